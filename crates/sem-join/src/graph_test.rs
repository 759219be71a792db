use super::*;
use sem_core::entity::Entity;
use sem_core::registry::EntityRegistry;

fn entity_with_join(name: &str, target: &str, relationship: &str) -> Entity {
    Entity::from_yaml(
        &format!(
            r#"
name: {name}
table: analytics.{name}
grain: g
dimensions:
  - name: id
    sql: "{{CUBE}}.id"
joins:
  - target_entity: {target}
    relationship: {relationship}
    field: id
    target_field: {name}_id
"#
        ),
        name,
    )
    .unwrap()
}

fn bare_entity(name: &str) -> Entity {
    Entity::from_yaml(&format!("name: {name}\ntable: analytics.{name}\ngrain: g\n"), name).unwrap()
}

#[test]
fn shortest_path_direct_edge() {
    let a = entity_with_join("a", "b", "many_to_one");
    let b = bare_entity("b");
    let reg = EntityRegistry::from_entities(vec![a, b]);
    let graph = JoinGraph::build(&reg);
    let path = graph.shortest_path("a", "b").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].from_entity, "a");
    assert_eq!(path[0].to_entity, "b");
    assert_eq!(path[0].relationship, sem_core::entity::Relationship::ManyToOne);
}

#[test]
fn shortest_path_is_traversable_in_reverse_with_flipped_relationship() {
    let a = entity_with_join("a", "b", "many_to_one");
    let b = bare_entity("b");
    let reg = EntityRegistry::from_entities(vec![a, b]);
    let graph = JoinGraph::build(&reg);
    let path = graph.shortest_path("b", "a").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].from_entity, "b");
    assert_eq!(path[0].to_entity, "a");
    assert_eq!(path[0].relationship, sem_core::entity::Relationship::OneToMany);
}

#[test]
fn shortest_path_same_node_is_empty() {
    let a = bare_entity("a");
    let reg = EntityRegistry::from_entities(vec![a]);
    let graph = JoinGraph::build(&reg);
    assert!(graph.shortest_path("a", "a").unwrap().is_empty());
}

#[test]
fn shortest_path_through_intermediate_entity() {
    let a = entity_with_join("a", "b", "many_to_one");
    let b = entity_with_join("b", "c", "many_to_one");
    let c = bare_entity("c");
    let reg = EntityRegistry::from_entities(vec![a, b, c]);
    let graph = JoinGraph::build(&reg);
    let path = graph.shortest_path("a", "c").unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].from_entity, "a");
    assert_eq!(path[0].to_entity, "b");
    assert_eq!(path[1].from_entity, "b");
    assert_eq!(path[1].to_entity, "c");
}

#[test]
fn unreachable_target_is_an_error() {
    let a = bare_entity("a");
    let b = bare_entity("b");
    let reg = EntityRegistry::from_entities(vec![a, b]);
    let graph = JoinGraph::build(&reg);
    let err = graph.shortest_path("a", "b").unwrap_err();
    assert_eq!(
        err,
        JoinError::Unreachable {
            base: "a".to_string(),
            target: "b".to_string()
        }
    );
}

#[test]
fn many_to_many_relationship_is_symmetric() {
    let a = entity_with_join("a", "b", "many_to_many");
    let b = bare_entity("b");
    let reg = EntityRegistry::from_entities(vec![a, b]);
    let graph = JoinGraph::build(&reg);
    let forward = graph.shortest_path("a", "b").unwrap();
    let backward = graph.shortest_path("b", "a").unwrap();
    assert_eq!(forward[0].relationship, sem_core::entity::Relationship::ManyToMany);
    assert_eq!(backward[0].relationship, sem_core::entity::Relationship::ManyToMany);
}

//! fondhtn Core Integration Tests

use fondhtn_core::{
    Error, convert,
    config::Config,
    domain::EffectAlternative,
    fond::{VariantNaming, merge_variants},
    grounded,
    output::{read_domain, write_domain},
};
use tempfile::TempDir;

const TWO_ACTIONS: &str = include_str!("fixtures/two_actions.ground");
const PICK: &str = include_str!("fixtures/pick.ground");

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_actions_are_named_after_primitive_tasks() {
    let domain = grounded::decode(TWO_ACTIONS).unwrap();

    let names: Vec<&str> = domain.actions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["start[]", "finish[]"]);
    assert_eq!(domain.actions["start[]"].cost, 0);
    assert_eq!(domain.actions["finish[]"].cost, 5);
    for action in domain.actions.values() {
        assert!(action.precond.is_empty());
        assert_eq!(action.effects, vec![EffectAlternative::default()]);
    }

    assert_eq!(domain.abstract_tasks, vec!["root[]"]);
    assert_eq!(domain.initial_abstract_task, "root[]");
    assert!(domain.initial_state.is_empty());
    assert_eq!(domain.methods["m_root"].subtasks, vec!["start[]", "finish[]"]);
}

#[test]
fn test_action_count_equals_primitive_count() {
    for text in [TWO_ACTIONS, PICK] {
        let sections = grounded::Sections::split(text);
        let tasks = grounded::TaskTable::from_sections(&sections).unwrap();
        let domain = grounded::decode(text).unwrap();
        assert_eq!(domain.actions.len(), tasks.primitive_count());
    }
}

#[test]
fn test_pick_variants_merge_into_one_action() {
    let domain = convert(PICK, &Config::default()).unwrap();

    let names: Vec<&str> = domain.actions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["noop[]", "pick[x]"]);

    let pick = &domain.actions["pick[x]"];
    assert_eq!(pick.cost, 1);
    assert_eq!(pick.precond, vec!["+free[x]"]);
    assert_eq!(
        pick.effects,
        vec![
            EffectAlternative::new(strings(&["+held[x]"]), strings(&["+free[x]"])),
            EffectAlternative::new(strings(&["+dropped[x]"]), strings(&["+free[x]"])),
        ]
    );

    assert!(!domain.methods.contains_key("fond_act__pick0"));
    assert!(!domain.methods.contains_key("fond_act__pick1"));
    assert_eq!(domain.methods["m_root"].subtasks, vec!["pick[x]", "noop[]"]);
    assert_eq!(domain.abstract_tasks, vec!["root[]"]);
    assert_eq!(domain.initial_abstract_task, "root[]");
    assert_eq!(domain.initial_state, vec!["+free[x]"]);
}

#[test]
fn test_merge_can_be_disabled() {
    let mut config = Config::default();
    config.merge.enabled = false;
    let domain = convert(PICK, &config).unwrap();

    assert_eq!(domain.actions.len(), 4);
    assert!(domain.actions.contains_key("fond_act__pick0[x]"));
    assert_eq!(domain.methods.len(), 3);
    assert_eq!(domain.abstract_tasks, vec!["root[]", "pick[x]"]);
}

#[test]
fn test_merging_twice_changes_nothing() {
    let once = convert(PICK, &Config::default()).unwrap();
    let twice = merge_variants(once.clone(), &VariantNaming::default()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_conversion_is_deterministic() {
    let first = serde_json::to_string(&convert(PICK, &Config::default()).unwrap()).unwrap();
    let second = serde_json::to_string(&convert(PICK, &Config::default()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_planner_json_shape() {
    let domain = convert(PICK, &Config::default()).unwrap();
    let json = serde_json::to_value(&domain).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "actions",
        "methods",
        "tasks",
        "state_features",
        "initial_state",
        "initial_abstract_task",
    ] {
        assert!(keys.contains(&key), "missing key {}", key);
    }
    assert_eq!(json["actions"]["pick[x]"]["effects"][1]["add_eff"][0], "+dropped[x]");
    assert_eq!(json["methods"]["m_root"]["orderings"], serde_json::json!([[0, 1]]));
}

#[test]
fn test_out_of_range_root_task_aborts() {
    let text = PICK.replace(";; initial abstract task\n4", ";; initial abstract task\n9");
    match convert(&text, &Config::default()) {
        Err(Error::OutOfRangeIndex { section, .. }) => assert_eq!(section, "initial_abstract_task"),
        other => panic!("expected OutOfRangeIndex, got {:?}", other),
    }
}

#[test]
fn test_missing_methods_section_aborts() {
    let cut = PICK.find(";; methods").unwrap();
    assert!(matches!(
        convert(&PICK[..cut], &Config::default()),
        Err(Error::MissingSection(name)) if name == "methods"
    ));
}

#[test]
fn test_pruned_variant_fails_closed() {
    // Drop the second variant's routing method but keep its action
    let cut = PICK.find("fond_act__pick1\n5").unwrap();
    let end = PICK.find("m_root").unwrap();
    let text = format!("{}{}", &PICK[..cut], &PICK[end..]);

    assert!(matches!(
        convert(&text, &Config::default()),
        Err(Error::VariantCountMismatch { .. })
    ));
}

#[test]
fn test_output_roundtrip_and_no_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("result.json");
    let domain = convert(PICK, &Config::default()).unwrap();

    write_domain(&path, &domain, true).unwrap();
    assert_eq!(read_domain(&path).unwrap(), domain);
    assert!(matches!(
        write_domain(&path, &domain, true),
        Err(Error::DuplicateOutput(_))
    ));
}

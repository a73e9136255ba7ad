use serde_json::json;
use siftapp::chip::ChipAction;
use siftapp::clause::{Clause, ClauseAction, ClauseValue, FacetKind};
use siftapp::config::{BooleanGroupConfig, PanelConfig};
use siftapp::event::FacetEvent;
use siftapp::facets::{FacetType, NodeKey, RefineNode};
use siftapp::rank::TaxonRank;
use siftapp::search::TaxonMatch;
use siftapp::session::FilterSession;

fn config() -> PanelConfig {
    PanelConfig {
        boolean_groups: Some(vec![BooleanGroupConfig {
            key: "data_types".to_string(),
            label: "Data type".to_string(),
            kind: FacetKind::HasData,
            traits: vec!["Genome".into(), "Locus".into(), "Specimen".into(), "Other".into()],
        }]),
        refine_tree: Some(vec![RefineNode::new(
            "commercial_sector_icon",
            "agriculture",
            "Agriculture",
        )
        .with_children(vec![
            RefineNode::new("agricultural_industry_icon", "livestock", "Livestock"),
            RefineNode::new("agricultural_industry_icon", "crops", "Crops"),
        ])]),
        ..Default::default()
    }
}

fn open() -> FilterSession {
    let mut session = FilterSession::new(config());
    session.open("arga", None).unwrap();
    session
}

fn agriculture() -> NodeKey {
    NodeKey::new("commercial_sector_icon", "agriculture")
}

fn livestock() -> NodeKey {
    NodeKey::new("agricultural_industry_icon", "livestock")
}

fn toggle_trait(name: &str, active: bool) -> FacetEvent {
    FacetEvent::ToggleTrait {
        group: "data_types".into(),
        name: name.into(),
        active,
    }
}

fn mammalia() -> TaxonMatch {
    TaxonMatch::new("X1", "Mammalia", TaxonRank::Class)
}

#[test]
fn test_untouched_panel_projects_nothing() {
    let session = open();
    let view = session.view().unwrap();
    assert!(view.clauses.is_empty());
    assert!(view.chips.is_empty());
}

#[test]
fn test_locus_scenario_wire_output() {
    let mut session = open();
    session.apply(toggle_trait("Locus", true)).unwrap();

    let clauses = session.view().unwrap().clauses;
    assert_eq!(
        serde_json::to_value(&clauses).unwrap(),
        json!([{"facetKind": "HAS_DATA", "action": "INCLUDE", "value": "Locus"}])
    );
}

#[test]
fn test_registration_order_beats_activation_order() {
    let mut session = open();
    for name in ["Other", "Genome", "Specimen"] {
        session.apply(toggle_trait(name, true)).unwrap();
    }

    let values: Vec<_> = session
        .view()
        .unwrap()
        .clauses
        .into_iter()
        .map(|c| c.value)
        .collect();
    assert_eq!(
        values,
        vec![
            ClauseValue::text("Genome"),
            ClauseValue::text("Specimen"),
            ClauseValue::text("Other"),
        ]
    );
}

#[test]
fn test_adding_a_taxon_twice_keeps_one_entry() {
    let mut session = open();
    session.apply(FacetEvent::AddTaxon(mammalia())).unwrap();
    session.apply(FacetEvent::AddTaxon(mammalia())).unwrap();

    let panel = session.panel().unwrap();
    let entries = panel.classification().unwrap().entries();
    assert_eq!(entries.iter().filter(|e| e.identifier == "X1").count(), 1);
    assert_eq!(panel.clauses().len(), 1);
}

#[test]
fn test_excluding_a_class_wire_output() {
    let mut session = open();
    session.apply(FacetEvent::AddTaxon(mammalia())).unwrap();
    session
        .apply(FacetEvent::SwitchTaxon {
            identifier: "X1".into(),
            include: false,
        })
        .unwrap();

    assert_eq!(
        serde_json::to_value(session.view().unwrap().clauses).unwrap(),
        json!([{"facetKind": "CLASS", "action": "EXCLUDE", "value": "Mammalia"}])
    );
}

#[test]
fn test_refine_tree_scenario() {
    let mut session = open();
    session
        .apply(FacetEvent::ToggleRefine {
            ancestors: vec![agriculture()],
            node: livestock(),
        })
        .unwrap();

    let view = session.view().unwrap();
    assert_eq!(
        serde_json::to_value(&view.clauses).unwrap(),
        json!([{
            "facetKind": "ATTRIBUTE",
            "action": "INCLUDE",
            "value": [{"name": "agricultural_industry_icon", "value": "livestock"}]
        }])
    );
    assert_eq!(view.chips.len(), 1);
    assert_eq!(view.chips[0].label, "Agriculture > Livestock");
}

#[test]
fn test_refine_reselect_round_trip() {
    let mut session = open();
    let select = FacetEvent::ToggleRefine {
        ancestors: vec![agriculture()],
        node: livestock(),
    };

    session.apply(select.clone()).unwrap();
    session.apply(select.clone()).unwrap();
    let path = session.panel().unwrap().refine_tree().unwrap().path().to_vec();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].key(), agriculture());

    session.apply(select).unwrap();
    let path = session.panel().unwrap().refine_tree().unwrap().path().to_vec();
    assert_eq!(
        path.iter().map(|e| e.key()).collect::<Vec<_>>(),
        vec![agriculture(), livestock()]
    );
}

#[test]
fn test_refine_tree_never_emits_more_than_one_clause() {
    let mut session = FilterSession::new(config());
    session.open("arga", Some(&[FacetType::RefineTree])).unwrap();
    let crops = NodeKey::new("agricultural_industry_icon", "crops");

    let steps = [
        (vec![], agriculture()),
        (vec![agriculture()], livestock()),
        (vec![agriculture()], crops.clone()),
        (vec![agriculture()], crops),
        (vec![agriculture()], livestock()),
        (vec![], agriculture()),
    ];
    for (ancestors, node) in steps {
        session
            .apply(FacetEvent::ToggleRefine { ancestors, node })
            .unwrap();
        assert!(session.view().unwrap().clauses.len() <= 1);
    }
}

#[test]
fn test_chip_removal_clears_every_facet_kind() {
    let mut session = open();
    session.apply(toggle_trait("Genome", true)).unwrap();
    session.apply(FacetEvent::AddTaxon(mammalia())).unwrap();
    session
        .apply(FacetEvent::SelectOption {
            value: Some("BIRDS".into()),
        })
        .unwrap();
    session
        .apply(FacetEvent::ToggleRefine {
            ancestors: vec![agriculture()],
            node: livestock(),
        })
        .unwrap();

    let chips = session.view().unwrap().chips;
    assert_eq!(chips.len(), 4);

    for chip in chips {
        let before: Vec<Clause> = session.view().unwrap().clauses;
        let removed = before.len();
        session.activate_chip(&chip.key, ChipAction::Remove).unwrap();

        let after = session.view().unwrap();
        assert_eq!(after.clauses.len(), removed - 1);
        assert!(after.chips.iter().all(|c| c.key != chip.key));
    }
    assert!(session.view().unwrap().clauses.is_empty());
}

#[test]
fn test_chip_switch_flips_polarity_both_ways() {
    let mut session = open();
    session.apply(FacetEvent::AddTaxon(mammalia())).unwrap();

    session.activate_chip("taxon:X1", ChipAction::Switch).unwrap();
    assert_eq!(
        session.view().unwrap().clauses[0].action,
        ClauseAction::Exclude
    );

    session.activate_chip("taxon:X1", ChipAction::Switch).unwrap();
    assert_eq!(
        session.view().unwrap().clauses[0].action,
        ClauseAction::Include
    );
}

#[test]
fn test_threatened_view_enables_only_its_facets() {
    let mut session = FilterSession::new(config());
    session
        .open(
            "threatened",
            Some(&[FacetType::SingleSelect, FacetType::Boolean]),
        )
        .unwrap();

    session.apply(toggle_trait("Locus", true)).unwrap();
    session
        .apply(FacetEvent::SelectOption {
            value: Some("MAMMALS".into()),
        })
        .unwrap();
    assert!(session
        .apply(FacetEvent::ToggleRefine {
            ancestors: vec![],
            node: agriculture(),
        })
        .is_err());

    let kinds: Vec<_> = session
        .view()
        .unwrap()
        .clauses
        .iter()
        .map(|c| c.facet_kind)
        .collect();
    assert_eq!(kinds, vec![FacetKind::HasData, FacetKind::VernacularGroup]);
}

#[test]
fn test_events_replay_from_json() {
    let mut session = open();
    let script = json!([
        {"type": "toggle_trait", "group": "data_types", "name": "Specimen", "active": true},
        {"type": "switch_trait", "group": "data_types", "name": "Specimen", "include": false},
        {"type": "add_taxon", "identifier": "X1", "displayName": "Mammalia", "rank": "CLASS"},
        {"type": "toggle_refine", "ancestors": [], "node": {
            "attributeName": "commercial_sector_icon", "attributeValue": "agriculture"
        }}
    ]);
    let events: Vec<FacetEvent> = serde_json::from_value(script).unwrap();
    for event in events {
        session.apply(event).unwrap();
    }

    assert_eq!(
        serde_json::to_value(session.view().unwrap().clauses).unwrap(),
        json!([
            {"facetKind": "HAS_DATA", "action": "EXCLUDE", "value": "Specimen"},
            {"facetKind": "CLASS", "action": "INCLUDE", "value": "Mammalia"},
            {"facetKind": "ATTRIBUTE", "action": "INCLUDE",
             "value": [{"name": "commercial_sector_icon", "value": "agriculture"}]}
        ])
    );
}

#[test]
fn test_search_begun_before_subject_change_cannot_land() {
    let mut session = open();
    let old = session.begin_search("mam").unwrap();

    session.set_subject("dataset-2").unwrap();
    let newer = session.begin_search("aves").unwrap();

    let aves = TaxonMatch::new("X3", "Aves", TaxonRank::Class);
    assert!(!session.commit_search(old, Ok(vec![mammalia()])).unwrap());
    assert!(session.commit_search(newer, Ok(vec![aves.clone()])).unwrap());
    assert_eq!(session.panel().unwrap().candidates(), &[aves]);
}

#[test]
fn test_search_begun_before_close_cannot_land() {
    let mut session = open();
    let old = session.begin_search("mam").unwrap();
    session.close();
    session.open("arga", None).unwrap();

    assert!(!session.commit_search(old, Ok(vec![mammalia()])).unwrap());
    assert!(session.panel().unwrap().candidates().is_empty());
}

#[test]
fn test_taxon_identifier_cannot_shadow_other_chips() {
    let mut session = open();
    session
        .apply(FacetEvent::SelectOption {
            value: Some("BIRDS".into()),
        })
        .unwrap();
    for identifier in ["vernacular_group", "select:vernacular_group", "refine"] {
        session
            .apply(FacetEvent::AddTaxon(TaxonMatch::new(
                identifier,
                identifier,
                TaxonRank::Genus,
            )))
            .unwrap();
    }

    let view = session.view().unwrap();
    let mut keys: Vec<_> = view.chips.iter().map(|chip| chip.key.clone()).collect();
    assert_eq!(keys.len(), 4);
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 4);

    session
        .activate_chip("select:vernacular_group", ChipAction::Remove)
        .unwrap();
    let view = session.view().unwrap();
    assert!(view
        .clauses
        .iter()
        .all(|clause| clause.facet_kind != FacetKind::VernacularGroup));
    assert_eq!(view.clauses.len(), 3);
}

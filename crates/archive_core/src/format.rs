use crate::{CreatureId, CreatureRecord, NodeElement, PathElement, PathResult, StepElement};

/// Expands a raw id path into alternating node and step elements.
///
/// The first node is flagged as start and the last as target (a one-node path
/// is both). Records without a generation get a positional label instead.
/// Ids the lookup cannot resolve are left out.
pub fn format_path<'a>(
    ids: &[CreatureId],
    lookup: impl Fn(&CreatureId) -> Option<&'a CreatureRecord>,
) -> PathResult {
    let records: Vec<&CreatureRecord> = ids.iter().filter_map(&lookup).collect();
    let last = records.len().saturating_sub(1);

    let mut formatted = Vec::with_capacity(records.len() * 2);
    for (index, record) in records.into_iter().enumerate() {
        let is_start = index == 0;
        let is_target = index == last;
        formatted.push(PathElement::Node(Box::new(node_element(
            record, is_start, is_target,
        ))));
        if index < last {
            formatted.push(PathElement::Step(StepElement { step: index + 1 }));
        }
    }
    formatted
}

fn node_element(record: &CreatureRecord, is_start: bool, is_target: bool) -> NodeElement {
    let fallback = if is_start {
        "Start"
    } else if is_target {
        "Target"
    } else {
        "Step"
    };
    let mut record = record.clone();
    if record.image_path.is_none() {
        record.image_path.clone_from(&record.url);
    }
    NodeElement {
        generation_label: record
            .generation
            .clone()
            .unwrap_or_else(|| fallback.to_string()),
        record,
        is_start,
        is_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::record;
    use std::collections::HashMap;

    fn lookup_from(records: &[CreatureRecord]) -> HashMap<CreatureId, &CreatureRecord> {
        records.iter().map(|r| (r.id.clone(), r)).collect()
    }

    fn ids(names: &[&str]) -> Vec<CreatureId> {
        names.iter().map(|n| CreatureId::from(*n)).collect()
    }

    #[test]
    fn test_three_node_path_alternates() {
        let records = vec![record("A"), record("B"), record("C")];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A", "B", "C"]), |id| lookup.get(id).copied());

        assert_eq!(path.len(), 5);
        let a = path[0].as_node().unwrap();
        assert!(a.is_start && !a.is_target);
        assert_eq!(a.generation_label, "Start");
        assert_eq!(path[1].as_step(), Some(StepElement { step: 1 }));
        let b = path[2].as_node().unwrap();
        assert!(!b.is_start && !b.is_target);
        assert_eq!(b.generation_label, "Step");
        assert_eq!(path[3].as_step(), Some(StepElement { step: 2 }));
        let c = path[4].as_node().unwrap();
        assert!(c.is_target && !c.is_start);
        assert_eq!(c.generation_label, "Target");
    }

    #[test]
    fn test_single_node_is_start_and_target() {
        let records = vec![record("A")];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A"]), |id| lookup.get(id).copied());

        assert_eq!(path.len(), 1);
        let node = path[0].as_node().unwrap();
        assert!(node.is_start && node.is_target);
        assert_eq!(node.generation_label, "Start");
    }

    #[test]
    fn test_record_generation_wins_over_fallback() {
        let mut rookie = record("B");
        rookie.generation = Some("Rookie".to_string());
        let records = vec![record("A"), rookie];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A", "B"]), |id| lookup.get(id).copied());

        assert_eq!(path[2].as_node().unwrap().generation_label, "Rookie");
    }

    #[test]
    fn test_image_path_falls_back_to_url() {
        let mut a = record("A");
        a.url = Some("/img/a.png".to_string());
        let records = vec![a];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A"]), |id| lookup.get(id).copied());

        let node = path[0].as_node().unwrap();
        assert_eq!(node.record.image_path.as_deref(), Some("/img/a.png"));
    }

    #[test]
    fn test_descriptive_attributes_pass_through() {
        let mut a = record("A");
        a.attribute = Some("Vaccine".to_string());
        a.extra
            .insert("base_stats".to_string(), serde_json::json!({"hp": 287}));
        let records = vec![a.clone()];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A"]), |id| lookup.get(id).copied());

        let node = path[0].as_node().unwrap();
        assert_eq!(node.record.attribute, a.attribute);
        assert_eq!(node.record.extra, a.extra);
    }

    #[test]
    fn test_unresolved_ids_are_skipped() {
        let records = vec![record("A"), record("C")];
        let lookup = lookup_from(&records);
        let path = format_path(&ids(&["A", "Ghost", "C"]), |id| lookup.get(id).copied());

        assert_eq!(path.len(), 3);
        assert_eq!(path[1].as_step(), Some(StepElement { step: 1 }));
    }
}

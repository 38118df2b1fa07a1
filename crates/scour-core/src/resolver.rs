use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Relationship, TableRef};

/// Result of dependency resolution: the order in which tables can be
/// emptied, plus the tables whose foreign keys must be suspended before
/// any delete runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPlan {
    pub delete_order: Vec<TableRef>,
    pub constraints_to_disable: BTreeSet<TableRef>,
}

impl DeletionPlan {
    /// A plan with nothing to delete. Valid output for an empty or fully
    /// filtered-out schema.
    pub fn empty() -> Self {
        Self {
            delete_order: Vec::new(),
            constraints_to_disable: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.delete_order.is_empty() && self.constraints_to_disable.is_empty()
    }
}

/// Compute a safe deletion order by iteratively stripping leaf tables.
///
/// Each round removes every table no live relationship still references.
/// When no leaf remains but tables do, the remainder is cyclic: those
/// tables are appended to the order as-is and returned in
/// `constraints_to_disable`, so their constraints can be suspended before
/// the deletes run.
///
/// Relationships that reference their own table carry no ordering
/// obligation, and neither do relationships with an endpoint outside
/// `tables` (a filtered-out neighbor): deleting only the child side of
/// such an edge cannot violate the constraint.
pub fn resolve(tables: &[TableRef], relationships: &[Relationship]) -> DeletionPlan {
    let index: HashMap<&TableRef, usize> = tables
        .iter()
        .enumerate()
        .map(|(position, table)| (table, position))
        .collect();

    // (pk, fk) index pairs. An edge stays live exactly as long as its
    // referencing side has not been deleted.
    let mut edges: Vec<(usize, usize)> = relationships
        .iter()
        .filter(|rel| !rel.is_self_referencing())
        .filter_map(|rel| {
            let pk = *index.get(&rel.primary_key_table)?;
            let fk = *index.get(&rel.foreign_key_table)?;
            Some((pk, fk))
        })
        .collect();

    let mut live = vec![true; tables.len()];
    let mut delete_order = Vec::with_capacity(tables.len());
    let mut remaining = tables.len();

    while remaining > 0 {
        let mut referenced = vec![false; tables.len()];
        for &(pk, _) in &edges {
            referenced[pk] = true;
        }

        let leaves: Vec<usize> = (0..tables.len())
            .filter(|&i| live[i] && !referenced[i])
            .collect();

        if leaves.is_empty() {
            // Every remaining table is referenced by another remaining
            // table, so no ordering can make progress.
            let remainder: Vec<usize> = (0..tables.len()).filter(|&i| live[i]).collect();
            let constraints_to_disable = remainder.iter().map(|&i| tables[i].clone()).collect();
            delete_order.extend(remainder.into_iter().map(|i| tables[i].clone()));
            return DeletionPlan {
                delete_order,
                constraints_to_disable,
            };
        }

        for &i in &leaves {
            live[i] = false;
            delete_order.push(tables[i].clone());
            remaining -= 1;
        }
        edges.retain(|&(_, fk)| live[fk]);
    }

    DeletionPlan {
        delete_order,
        constraints_to_disable: BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> TableRef {
        TableRef::new("dbo", name)
    }

    fn rel(name: &str, pk: &TableRef, fk: &TableRef) -> Relationship {
        Relationship {
            name: name.to_string(),
            primary_key_table: pk.clone(),
            foreign_key_table: fk.clone(),
        }
    }

    fn position(plan: &DeletionPlan, table: &TableRef) -> usize {
        plan.delete_order
            .iter()
            .position(|item| item == table)
            .unwrap_or_else(|| panic!("{table} missing from delete order"))
    }

    #[test]
    fn orders_children_before_parents() {
        let bob = table("Bob");
        let foo = table("Foo");
        let bar = table("Bar");
        let tables = vec![bob.clone(), foo.clone(), bar.clone()];
        let rels = vec![
            rel("FK_FOO_BOB", &bob, &foo),
            rel("FK_BAR_FOO", &foo, &bar),
        ];

        let plan = resolve(&tables, &rels);

        assert_eq!(plan.delete_order, vec![bar, foo, bob]);
        assert!(plan.constraints_to_disable.is_empty());
    }

    #[test]
    fn single_table_needs_no_ordering() {
        let foo = table("Foo");

        let plan = resolve(std::slice::from_ref(&foo), &[]);

        assert_eq!(plan.delete_order, vec![foo]);
        assert!(plan.constraints_to_disable.is_empty());
    }

    #[test]
    fn empty_schema_yields_empty_plan() {
        let plan = resolve(&[], &[]);
        assert!(plan.is_empty());
        assert_eq!(plan, DeletionPlan::empty());
    }

    #[test]
    fn cycle_terminates_and_disables_both_tables() {
        let a = table("A");
        let b = table("B");
        let tables = vec![a.clone(), b.clone()];
        let rels = vec![rel("FK_B_A", &a, &b), rel("FK_A_B", &b, &a)];

        let plan = resolve(&tables, &rels);

        assert!(plan.constraints_to_disable.contains(&a));
        assert!(plan.constraints_to_disable.contains(&b));
        // The cyclic remainder is still emptied once its constraints are off.
        assert_eq!(plan.delete_order.len(), 2);
    }

    #[test]
    fn leaves_outside_a_cycle_resolve_before_the_fallback() {
        let a = table("A");
        let b = table("B");
        let c = table("C");
        let tables = vec![a.clone(), b.clone(), c.clone()];
        let rels = vec![
            rel("FK_B_A", &a, &b),
            rel("FK_A_B", &b, &a),
            rel("FK_C_A", &a, &c),
        ];

        let plan = resolve(&tables, &rels);

        assert_eq!(plan.delete_order[0], c);
        assert_eq!(
            plan.constraints_to_disable,
            BTreeSet::from([a.clone(), b.clone()])
        );
        assert!(!plan.constraints_to_disable.contains(&c));
    }

    #[test]
    fn self_reference_is_still_a_leaf() {
        let foo = table("Foo");
        let rels = vec![rel("FK_FOO_FOO", &foo, &foo)];

        let plan = resolve(std::slice::from_ref(&foo), &rels);

        assert_eq!(plan.delete_order, vec![foo]);
        assert!(plan.constraints_to_disable.is_empty());
    }

    #[test]
    fn relationship_to_a_filtered_out_table_is_ignored() {
        let foo = table("Foo");
        let ghost = table("Ghost");
        let rels = vec![rel("FK_FOO_GHOST", &ghost, &foo)];

        let plan = resolve(std::slice::from_ref(&foo), &rels);

        assert_eq!(plan.delete_order, vec![foo]);
        assert!(plan.constraints_to_disable.is_empty());
    }

    #[test]
    fn every_child_precedes_its_parent_in_a_diamond() {
        let a = table("A");
        let b = table("B");
        let c = table("C");
        let d = table("D");
        let tables = vec![a.clone(), b.clone(), c.clone(), d.clone()];
        let rels = vec![
            rel("FK_B_A", &a, &b),
            rel("FK_C_A", &a, &c),
            rel("FK_D_B", &b, &d),
            rel("FK_D_C", &c, &d),
        ];

        let plan = resolve(&tables, &rels);

        assert!(plan.constraints_to_disable.is_empty());
        for r in &rels {
            assert!(
                position(&plan, &r.foreign_key_table) < position(&plan, &r.primary_key_table),
                "{} must be deleted before {}",
                r.foreign_key_table,
                r.primary_key_table
            );
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let tables: Vec<TableRef> = ["T1", "T2", "T3", "T4"].iter().map(|&n| table(n)).collect();
        let rels = vec![
            rel("FK_2_1", &tables[0], &tables[1]),
            rel("FK_3_1", &tables[0], &tables[2]),
        ];

        let first = resolve(&tables, &rels);
        let second = resolve(&tables, &rels);

        assert_eq!(first, second);
    }
}

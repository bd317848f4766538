use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

use payrun_core::{BankAccounts, RunContext, align};
use payrun_model::{CanonicalIds, EmployeeId, RecordKey};

fn context() -> RunContext {
    RunContext {
        company: "Acme GmbH".to_string(),
        company_id: RecordKey::Integer(7),
        country: "Germany".to_string(),
        country_abbr: "DE".to_string(),
        pay_date: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        month: "January".to_string(),
        extra: Map::new(),
    }
}

fn arb_bank_record() -> impl Strategy<Value = Value> {
    (0i64..60, prop_oneof![Just(7i64), Just(8i64)], proptest::option::of("[A-Z]{2}[0-9]{4}"))
        .prop_map(|(employee, company, iban)| {
            json!({"employee": employee, "company": company, "iban": iban})
        })
}

proptest! {
    #[test]
    fn aligned_rows_follow_the_canonical_axis(
        ids in proptest::collection::btree_set(0i64..40, 0..20),
        records in proptest::collection::vec(arb_bank_record(), 0..60),
    ) {
        let canonical = CanonicalIds::from_sorted(
            ids.iter().copied().map(EmployeeId::from).collect(),
        ).unwrap();

        let mut valued: BTreeMap<i64, usize> = BTreeMap::new();
        let mut present: BTreeSet<i64> = BTreeSet::new();
        for record in &records {
            let employee = record["employee"].as_i64().unwrap();
            if record["company"] == json!(7) && ids.contains(&employee) {
                present.insert(employee);
                if !record["iban"].is_null() {
                    *valued.entry(employee).or_default() += 1;
                }
            }
        }

        let alignment = align(records, &canonical, &context(), &BankAccounts).unwrap();
        let table = &alignment.table;

        prop_assert!(table.has_axis(&canonical));
        prop_assert_eq!(table.len(), canonical.len());
        for (id, row) in table.iter() {
            if let Some(record) = row {
                let employee = record.value("employee").and_then(EmployeeId::from_json);
                prop_assert_eq!(employee.as_ref(), Some(id));
                prop_assert_eq!(record.value("company"), Some(&json!(7)));
            }
        }
        prop_assert_eq!(table.matched() + alignment.unresolved.len(), present.len());
        for duplicate in &alignment.unresolved {
            prop_assert!(duplicate.candidates.len() > 1);
            let key = match duplicate.employee.key() {
                RecordKey::Integer(value) => *value,
                RecordKey::Text(_) => unreachable!(),
            };
            prop_assert_ne!(valued.get(&key).copied().unwrap_or(0), 1);
        }
    }
}

//! Teardown driver: best-effort deletion of everything the run created.
//!
//! Deletes dependents before their dependencies: comments, contacts, blogs,
//! tags, categories. A failed delete is recorded and never blocks the rest;
//! the server is assumed to reject dependency-violating deletes gracefully
//! rather than cascade.

use super::banner;
use crate::ledger::ResourceKind;
use crate::runner::RunContext;

const ORDER: [ResourceKind; 5] = [
    ResourceKind::Comment,
    ResourceKind::Contact,
    ResourceKind::Blog,
    ResourceKind::Tag,
    ResourceKind::Category,
];

pub async fn run(cx: &mut RunContext) {
    banner("Cleaning Up Test Resources");

    for kind in ORDER {
        let ids = cx.ledger.all(kind).to_vec();
        for id in ids {
            let label = kind.label();
            let lower = label.to_ascii_lowercase();
            let result = cx
                .client
                .delete(&format!("{}/{id}", kind.collection_path()))
                .await;
            match &result {
                Ok(response) if response.status == 200 => {
                    cx.recorder.record(
                        format!("Delete {label}"),
                        true,
                        format!("Deleted {lower} {id}"),
                        None,
                    );
                }
                _ => {
                    cx.recorder.record(
                        format!("Delete {label}"),
                        false,
                        format!("Failed to delete {lower} {id}"),
                        None,
                    );
                }
            }
        }
    }
}

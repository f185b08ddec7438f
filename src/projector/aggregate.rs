use serde::Serialize;
use std::collections::HashMap;

use crate::gateway::types::Transaction;

use super::{category_bucket, location_label};

/// Label → count table that iterates in first-seen label order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Buckets {
    labels: Vec<String>,
    counts: Vec<u64>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Buckets {
    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.counts[i] += 1,
            None => {
                self.index.insert(label.to_string(), self.labels.len());
                self.labels.push(label.to_string());
                self.counts.push(1);
            }
        }
    }

    pub fn get(&self, label: &str) -> u64 {
        self.index.get(label).map(|&i| self.counts[i]).unwrap_or(0)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn group_by<'a>(snapshot: &'a [Transaction], key: impl Fn(&'a Transaction) -> &'a str) -> Buckets {
    let mut buckets = Buckets::default();
    for tx in snapshot {
        buckets.increment(key(tx));
    }
    buckets
}

pub fn aggregate_by_location(snapshot: &[Transaction]) -> Buckets {
    group_by(snapshot, location_label)
}

pub fn aggregate_by_category(snapshot: &[Transaction]) -> Buckets {
    group_by(snapshot, category_bucket)
}

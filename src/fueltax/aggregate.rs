use std::collections::HashMap;

use tracing::debug;

use crate::util::decimal::GreaterEqualZeroDecimal;

use super::{
    model::{
        jurisdiction::JurisdictionCode,
        records::{FuelPurchaseRecord, TripRecord},
    },
    resolver::JurisdictionResolver,
};

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MileageBucket {
    pub miles: GreaterEqualZeroDecimal,
    pub trip_count: u32,
}

impl Default for MileageBucket {
    fn default() -> Self {
        Self { miles: GreaterEqualZeroDecimal::zero(), trip_count: 0 }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FuelBucket {
    pub gallons: GreaterEqualZeroDecimal,
    pub total_amount: GreaterEqualZeroDecimal,
    pub receipt_count: u32,
}

impl Default for FuelBucket {
    fn default() -> Self {
        Self {
            gallons: GreaterEqualZeroDecimal::zero(),
            total_amount: GreaterEqualZeroDecimal::zero(),
            receipt_count: 0,
        }
    }
}

/// Per-jurisdiction buckets. Iterates in the order jurisdictions were first
/// seen, so results are deterministic for a given input order.
#[derive(Debug)]
pub struct JurisdictionBuckets<B> {
    order: Vec<JurisdictionCode>,
    buckets: HashMap<JurisdictionCode, B>,
    // Records which could not be assigned a jurisdiction.
    pub dropped_count: usize,
}

impl<B> JurisdictionBuckets<B> {
    pub fn new() -> Self {
        Self { order: Vec::new(), buckets: HashMap::new(), dropped_count: 0 }
    }

    pub fn get(&self, code: &str) -> Option<&B> {
        self.buckets.get(code)
    }

    pub fn codes(&self) -> &[JurisdictionCode] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (JurisdictionCode, &B)> + '_ {
        self.order.iter().filter_map(|c| self.buckets.get(c).map(|b| (*c, b)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<B: Default> JurisdictionBuckets<B> {
    fn bucket_mut(&mut self, code: JurisdictionCode) -> &mut B {
        if !self.buckets.contains_key(code) {
            self.order.push(code);
        }
        self.buckets.entry(code).or_default()
    }
}

impl<B> Default for JurisdictionBuckets<B> {
    fn default() -> Self {
        Self::new()
    }
}

pub type MileageAggregate = JurisdictionBuckets<MileageBucket>;
pub type FuelAggregate = JurisdictionBuckets<FuelBucket>;

/// A trip is attributed to where it started, or where it ended if the start
/// can't be resolved. All of its miles go to that one jurisdiction, even if
/// the trip crossed others.
pub fn resolve_trip_jurisdiction(
    trip: &TripRecord, resolver: &dyn JurisdictionResolver,
) -> Option<JurisdictionCode> {
    resolver.resolve(&trip.start_location)
        .or_else(|| resolver.resolve(&trip.end_location))
}

pub fn resolve_receipt_jurisdiction(
    receipt: &FuelPurchaseRecord, resolver: &dyn JurisdictionResolver,
) -> Option<JurisdictionCode> {
    resolver.resolve(&receipt.location)
}

pub fn aggregate_miles<'a, I>(trips: I, resolver: &dyn JurisdictionResolver) -> MileageAggregate
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut agg = MileageAggregate::new();
    for trip in trips {
        match resolve_trip_jurisdiction(trip, resolver) {
            Some(code) => {
                let bucket = agg.bucket_mut(code);
                bucket.miles += trip.miles();
                bucket.trip_count += 1;
            },
            None => {
                debug!("aggregate_miles: dropping trip on {} ({:?} -> {:?}): \
                       no jurisdiction", trip.date, trip.start_location, trip.end_location);
                agg.dropped_count += 1;
            },
        }
    }
    agg
}

pub fn aggregate_fuel<'a, I>(receipts: I, resolver: &dyn JurisdictionResolver) -> FuelAggregate
where
    I: IntoIterator<Item = &'a FuelPurchaseRecord>,
{
    let mut agg = FuelAggregate::new();
    for receipt in receipts {
        match resolve_receipt_jurisdiction(receipt, resolver) {
            Some(code) => {
                let bucket = agg.bucket_mut(code);
                bucket.gallons += receipt.gallons();
                bucket.total_amount += receipt.amount_paid();
                bucket.receipt_count += 1;
            },
            None => {
                debug!("aggregate_fuel: dropping receipt on {} at {:?}: no jurisdiction",
                       receipt.purchase_date, receipt.location);
                agg.dropped_count += 1;
            },
        }
    }
    agg
}

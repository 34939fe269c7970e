//! Bucketing of availability offers by stream type.

use crate::catalog::{AvailabilityOffer, StreamType, STREAM_TYPE_ORDER};
use crate::config::UnknownStreamTypePolicy;

/// Offers bucketed by stream type, in fixed display order
/// (subscription, free, ads, rent, buy).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedOffers {
    buckets: [Vec<AvailabilityOffer>; 5],
    discarded: usize,
}

impl GroupedOffers {
    fn bucket_index(stream_type: &StreamType) -> Option<usize> {
        STREAM_TYPE_ORDER
            .iter()
            .position(|known| known == stream_type)
    }

    /// Offers in one bucket. Unknown types have no bucket.
    pub fn get(&self, stream_type: &StreamType) -> &[AvailabilityOffer] {
        Self::bucket_index(stream_type)
            .map(|i| self.buckets[i].as_slice())
            .unwrap_or(&[])
    }

    /// All five buckets in display order, including empty ones.
    pub fn buckets(&self) -> impl Iterator<Item = (&StreamType, &[AvailabilityOffer])> {
        STREAM_TYPE_ORDER
            .iter()
            .zip(self.buckets.iter().map(Vec::as_slice))
    }

    /// Non-empty buckets in display order, paired with their labels.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[AvailabilityOffer])> {
        self.buckets()
            .filter(|(_, offers)| !offers.is_empty())
            .map(|(stream_type, offers)| (stream_type.label(), offers))
    }

    /// Total number of grouped offers.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offers dropped under [`UnknownStreamTypePolicy::Discard`].
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

/// Group offers, placing unknown stream types in the subscription bucket.
pub fn group(offers: &[AvailabilityOffer]) -> GroupedOffers {
    group_with(offers, UnknownStreamTypePolicy::Subscription)
}

/// Group offers with an explicit policy for unknown stream types.
pub fn group_with(offers: &[AvailabilityOffer], policy: UnknownStreamTypePolicy) -> GroupedOffers {
    let mut grouped = GroupedOffers::default();

    for offer in offers {
        let index = match GroupedOffers::bucket_index(&offer.stream_type) {
            Some(i) => i,
            None => match policy {
                UnknownStreamTypePolicy::Subscription => 0,
                UnknownStreamTypePolicy::Discard => {
                    grouped.discarded += 1;
                    continue;
                }
            },
        };
        grouped.buckets[index].push(offer.clone());
    }

    grouped
}

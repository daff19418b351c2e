//! Timeline assembly.
//!
//! A timeline is an ordered list of placed moments. Each placement stores the
//! start offset it had when it was appended; removing an earlier item does not
//! re-stamp later ones. [`Timeline::derived_start_times`] gives the offsets as
//! they would be recomputed from the current order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::moment::Moment;

/// Identifier of one placed instance on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl InstanceId {
    /// Generate a new random instance ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A moment placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    /// Copy of the originating catalog moment
    #[serde(flatten)]
    pub moment: Moment,

    pub instance_id: InstanceId,

    /// Offset in seconds, frozen at insertion
    pub start_time: u32,
}

impl TimelineItem {
    pub fn duration(&self) -> u32 {
        self.moment.duration
    }

    pub fn description(&self) -> &str {
        &self.moment.description
    }

    pub fn title(&self) -> &str {
        &self.moment.title
    }
}

/// Totals shown in the timeline dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineSummary {
    pub total_duration: u32,
    pub clip_count: usize,
}

/// Ordered sequence of placed moments. Insertion order is narrative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Timeline {
    items: Vec<TimelineItem>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a copy of `moment` at the end. Never fails.
    pub fn append(&mut self, moment: &Moment) -> &TimelineItem {
        let item = TimelineItem {
            moment: moment.clone(),
            instance_id: InstanceId::new(),
            start_time: self.total_duration(),
        };
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Remove the placement with `instance_id`. Unknown IDs are ignored.
    ///
    /// Returns the removed item, if any.
    pub fn remove(&mut self, instance_id: &InstanceId) -> Option<TimelineItem> {
        let index = self
            .items
            .iter()
            .position(|item| &item.instance_id == instance_id)?;
        Some(self.items.remove(index))
    }

    /// Sum of all placed durations. Zero when empty.
    pub fn total_duration(&self) -> u32 {
        self.items.iter().map(TimelineItem::duration).sum()
    }

    /// Offsets recomputed from the current order. Stored start times are untouched.
    pub fn derived_start_times(&self) -> Vec<u32> {
        self.items
            .iter()
            .scan(0u32, |offset, item| {
                let start = *offset;
                *offset += item.duration();
                Some(start)
            })
            .collect()
    }

    pub fn summary(&self) -> TimelineSummary {
        TimelineSummary {
            total_duration: self.total_duration(),
            clip_count: self.items.len(),
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn get(&self, instance_id: &InstanceId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| &item.instance_id == instance_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineItem;
    type IntoIter = std::slice::Iter<'a, TimelineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::MomentCategory;

    fn moment(id: &str, duration: u32) -> Moment {
        Moment::new(id, id.to_uppercase(), format!("{id} happens"), duration, MomentCategory::Visual)
    }

    #[test]
    fn test_empty_timeline_has_zero_duration() {
        let timeline = Timeline::new();
        assert_eq!(timeline.total_duration(), 0);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_total_duration_is_order_independent() {
        let durations = [3, 5, 8, 10, 4, 6];

        let mut forward = Timeline::new();
        for (i, d) in durations.iter().enumerate() {
            forward.append(&moment(&format!("m{i}"), *d));
        }

        let mut backward = Timeline::new();
        for (i, d) in durations.iter().enumerate().rev() {
            backward.append(&moment(&format!("m{i}"), *d));
        }

        assert_eq!(forward.total_duration(), 36);
        assert_eq!(backward.total_duration(), 36);
    }

    #[test]
    fn test_start_time_is_pre_append_total() {
        let mut timeline = Timeline::new();
        for d in [3, 5, 8] {
            let before = timeline.total_duration();
            let item = timeline.append(&moment("m", d));
            assert_eq!(item.start_time, before);
        }
        assert_eq!(timeline.items()[0].start_time, 0);
    }

    #[test]
    fn test_same_moment_twice_yields_distinct_instances() {
        let neon = moment("neon", 3);
        let mut timeline = Timeline::new();
        let first = timeline.append(&neon).clone();
        let second = timeline.append(&neon).clone();

        assert_ne!(first.instance_id, second.instance_id);
        assert_eq!(first.duration(), second.duration());
        assert_eq!(first.title(), second.title());
        assert_eq!(first.description(), second.description());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut timeline = Timeline::new();
        timeline.append(&moment("a", 3));
        timeline.append(&moment("b", 5));
        let before = timeline.clone();

        assert!(timeline.remove(&InstanceId::from_string("missing")).is_none());
        assert_eq!(timeline, before);
    }

    #[test]
    fn test_remove_leaves_stored_start_times_stale() {
        let mut timeline = Timeline::new();
        let a = timeline.append(&moment("a", 3)).instance_id.clone();
        timeline.append(&moment("b", 5));

        assert_eq!(timeline.derived_start_times(), vec![0, 3]);
        assert_eq!(timeline.total_duration(), 8);

        timeline.remove(&a);

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.items()[0].moment.id.as_str(), "b");
        assert_eq!(timeline.items()[0].start_time, 3);
        assert_eq!(timeline.derived_start_times(), vec![0]);
    }

    #[test]
    fn test_item_serializes_camel_case_flattened() {
        let mut timeline = Timeline::new();
        timeline.append(&moment("a", 3));
        let json = serde_json::to_value(&timeline).unwrap();

        let item = &json[0];
        assert_eq!(item["id"], "a");
        assert_eq!(item["duration"], 3);
        assert_eq!(item["startTime"], 0);
        assert!(item["instanceId"].is_string());
    }

    #[test]
    fn test_summary() {
        let mut timeline = Timeline::new();
        timeline.append(&moment("a", 3));
        timeline.append(&moment("b", 5));
        assert_eq!(
            timeline.summary(),
            TimelineSummary {
                total_duration: 8,
                clip_count: 2
            }
        );
    }
}

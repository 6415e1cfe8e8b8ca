use std::collections::HashSet;

use super::error::SelectionError;

/// Identifies one selectable row: an item inside a group, or the group
/// header itself when `item` is [`Coordinate::GROUP_HEADER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: usize,
    pub item: isize,
}

impl Coordinate {
    /// Sentinel item index marking the group header row.
    pub const GROUP_HEADER: isize = -1;

    pub fn new(group: usize, item: isize) -> Self {
        Self { group, item }
    }

    pub fn is_group_header(&self) -> bool {
        self.item == Self::GROUP_HEADER
    }
}

/// Multi-selection over a two-level hierarchy of groups and items.
///
/// Group and item counts come from two injected callbacks that are queried
/// fresh on every operation, so the model stays consistent when the
/// underlying collection resizes between calls. The `item_count` callback
/// answers `None` for a group it does not know about.
pub struct SelectionModel {
    selection: HashSet<Coordinate>,
    cursor: Option<Coordinate>,
    group_count: Box<dyn Fn() -> usize>,
    item_count: Box<dyn Fn(usize) -> Option<usize>>,
}

impl SelectionModel {
    pub fn new(
        group_count: impl Fn() -> usize + 'static,
        item_count: impl Fn(usize) -> Option<usize> + 'static,
    ) -> Self {
        Self {
            selection: HashSet::new(),
            cursor: None,
            group_count: Box::new(group_count),
            item_count: Box::new(item_count),
        }
    }

    /// Empties the selection. The cursor keeps its value so a later range
    /// select still anchors on the last touched row.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// The last coordinate passed to [`select_single`](Self::select_single)
    /// or [`select_append`](Self::select_append), if any.
    pub fn cursor(&self) -> Option<Coordinate> {
        self.cursor
    }

    /// Exact-coordinate membership test. A group header counts as selected
    /// only when its sentinel was selected explicitly, never because every
    /// item in the group happens to be.
    pub fn is_selected(&self, group: usize, item: isize) -> bool {
        self.selection.contains(&Coordinate::new(group, item))
    }

    /// Replaces the whole selection with the given coordinate and moves the
    /// cursor there.
    pub fn select_single(&mut self, group: usize, item: isize) -> &HashSet<Coordinate> {
        let coord = Coordinate::new(group, item);
        self.selection.clear();
        self.selection.insert(coord);
        self.cursor = Some(coord);
        &self.selection
    }

    /// Toggles the given coordinate in or out of the selection, leaving all
    /// other entries alone. The cursor moves to the coordinate whether it
    /// was added or removed.
    pub fn select_append(&mut self, group: usize, item: isize) -> &HashSet<Coordinate> {
        let coord = Coordinate::new(group, item);
        if !self.selection.remove(&coord) {
            self.selection.insert(coord);
        }
        self.cursor = Some(coord);
        &self.selection
    }

    /// Selects every coordinate between the cursor anchor and the
    /// destination, inclusive, walking group by group:
    ///
    /// - single-group range: anchor item through destination item;
    /// - first group of a multi-group range: anchor item through the last
    ///   item of that group;
    /// - last group: item 0 through the destination item;
    /// - middle groups: every item, plus the group-header sentinel.
    ///
    /// The walk is direction-normalized (anchor and destination swap when
    /// the anchor sorts after the destination) and additive: entries outside
    /// the range are untouched. The cursor does not move, so a chained range
    /// still anchors on the last single/append target. If the anchor was
    /// never set the walk starts at `(0, 0)`.
    ///
    /// Fails with [`SelectionError::InvalidGroup`] when the item-count
    /// callback cannot answer for a group in the walk. Counts for the whole
    /// walk are resolved before anything is inserted, so a failing call
    /// leaves the selection exactly as it was.
    pub fn select_range(
        &mut self,
        dst_group: usize,
        dst_item: isize,
    ) -> Result<&HashSet<Coordinate>, SelectionError> {
        let anchor = self.cursor.unwrap_or(Coordinate::new(0, 0));
        let dst = Coordinate::new(dst_group, dst_item);
        let (start, end) = if anchor > dst { (dst, anchor) } else { (anchor, dst) };

        let mut counts = Vec::with_capacity(end.group - start.group + 1);
        for group in start.group..=end.group {
            let count =
                (self.item_count)(group).ok_or(SelectionError::InvalidGroup { group })?;
            counts.push(count as isize);
        }

        for (count, group) in counts.into_iter().zip(start.group..=end.group) {
            let single = start.group == end.group;
            let first = group == start.group;
            let last = group == end.group;

            let (from, to) = if single {
                (start.item, end.item)
            } else if first {
                (start.item, count - 1)
            } else if last {
                (0, end.item)
            } else {
                self.selection
                    .insert(Coordinate::new(group, Coordinate::GROUP_HEADER));
                (0, count - 1)
            };

            for item in from..=to {
                self.selection.insert(Coordinate::new(group, item));
            }
        }
        Ok(&self.selection)
    }

    /// Toggle between "everything selected" and a single anchor row.
    ///
    /// When the current selection already equals the full set of selectable
    /// coordinates (all items, plus every group-header sentinel when
    /// `include_groups` is set), the selection collapses to the cursor, or
    /// `(0, 0)` if no cursor was ever set. Otherwise every selectable
    /// coordinate is added to the selection. Groups the item-count callback
    /// cannot answer for contribute nothing; this operation never fails.
    pub fn select_all(&mut self, include_groups: bool) {
        let mut target = HashSet::new();
        for group in 0..(self.group_count)() {
            let count = (self.item_count)(group).unwrap_or(0);
            for item in 0..count as isize {
                target.insert(Coordinate::new(group, item));
            }
            if include_groups {
                target.insert(Coordinate::new(group, Coordinate::GROUP_HEADER));
            }
        }

        if self.selection == target {
            self.selection.clear();
            let anchor = self.cursor.unwrap_or(Coordinate::new(0, 0));
            self.select_single(anchor.group, anchor.item);
        } else {
            self.selection.extend(target);
        }
    }

    /// Every selected coordinate, in set iteration order (not sorted).
    pub fn get_selection(&self) -> Vec<Coordinate> {
        self.selection.iter().copied().collect()
    }
}

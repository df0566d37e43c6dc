//! Drag-selection registry
//!
//! The host registers the on-screen rectangle of every selectable widget and
//! asks which ones intersect the rubber-band rectangle while the user drags.
//! Slots are addressed by generational keys: once a key is unregistered it
//! never resolves again, even after its slot is reused for a new widget.

/// Axis-aligned rectangle in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners in any order
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        let (left, right) = (a.0.min(b.0), a.0.max(b.0));
        let (top, bottom) = (a.1.min(b.1), a.1.max(b.1));
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlap test; touching edges count as intersecting
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }
}

/// Handle to a registered rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<(Rect, T)>,
}

/// Generational arena of selectable rectangles with a payload each
#[derive(Debug)]
pub struct SelectionRegistry<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> SelectionRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Add a rectangle, returning the key that addresses it
    pub fn register(&mut self, rect: Rect, payload: T) -> SlotKey {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some((rect, payload));
            return SlotKey {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            entry: Some((rect, payload)),
        });
        SlotKey {
            index,
            generation: 0,
        }
    }

    /// Remove a rectangle, returning its payload if the key was live
    pub fn unregister(&mut self, key: SlotKey) -> Option<T> {
        let slot = self.live_slot_mut(key)?;
        let (_, payload) = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.len -= 1;
        Some(payload)
    }

    /// Move or resize a registered rectangle; `false` for a stale key
    pub fn update_rect(&mut self, key: SlotKey, rect: Rect) -> bool {
        match self.live_slot_mut(key).and_then(|slot| slot.entry.as_mut()) {
            Some(entry) => {
                entry.0 = rect;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: SlotKey) -> Option<(&Rect, &T)> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.entry.as_ref())
            .map(|(rect, payload)| (rect, payload))
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Keys of every rectangle intersecting `area`, in slot order
    pub fn intersecting(&self, area: &Rect) -> Vec<SlotKey> {
        self.live()
            .filter(|(_, rect, _)| rect.intersects(area))
            .map(|(key, _, _)| key)
            .collect()
    }

    /// Payloads of every rectangle intersecting `area`, in slot order
    pub fn payloads_in(&self, area: &Rect) -> Vec<&T> {
        self.live()
            .filter(|(_, rect, _)| rect.intersects(area))
            .map(|(_, _, payload)| payload)
            .collect()
    }

    /// Forget every rectangle; outstanding keys become stale
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    fn live(&self) -> impl Iterator<Item = (SlotKey, &Rect, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry.as_ref().map(|(rect, payload)| {
                let key = SlotKey {
                    index: index as u32,
                    generation: slot.generation,
                };
                (key, rect, payload)
            })
        })
    }

    fn live_slot_mut(&mut self, key: SlotKey) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation && slot.entry.is_some())
    }
}

impl<T> Default for SelectionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize) -> Rect {
        Rect::new(0.0, line as f64 * 20.0, 300.0, 18.0)
    }

    #[test]
    fn drag_selects_overlapping_rows() {
        let mut registry = SelectionRegistry::new();
        for line in 0..5 {
            registry.register(row(line), line);
        }

        let drag = Rect::from_corners((150.0, 65.0), (10.0, 25.0));
        let lines: Vec<usize> = registry.payloads_in(&drag).into_iter().copied().collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(10.5, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn stale_keys_never_alias_reused_slots() {
        let mut registry = SelectionRegistry::new();
        let first = registry.register(row(0), "first");
        assert_eq!(registry.unregister(first), Some("first"));

        let second = registry.register(row(0), "second");
        assert_eq!(first.index, second.index);
        assert!(registry.get(first).is_none());
        assert!(registry.unregister(first).is_none());
        assert!(!registry.update_rect(first, row(3)));
        assert_eq!(registry.get(second).map(|(_, p)| *p), Some("second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn update_rect_moves_hit_area() {
        let mut registry = SelectionRegistry::new();
        let key = registry.register(row(0), ());
        let far = Rect::new(0.0, 500.0, 10.0, 10.0);
        assert!(registry.intersecting(&far).is_empty());

        assert!(registry.update_rect(key, Rect::new(0.0, 505.0, 10.0, 10.0)));
        assert_eq!(registry.intersecting(&far), vec![key]);
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut registry = SelectionRegistry::new();
        let a = registry.register(row(0), 0);
        let b = registry.register(row(1), 1);
        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.contains(a));
        assert!(!registry.contains(b));
        let c = registry.register(row(2), 2);
        assert!(registry.contains(c));
        assert_eq!(registry.len(), 1);
    }
}

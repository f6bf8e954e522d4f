//! Distance tiers collected while scanning candidates.

/// Best and next-best candidates seen so far.
///
/// The next tier is only tracked when `track_next` is set. When a new best
/// distance shows up, the old best tier becomes the next tier.
pub(crate) struct Tiers<T> {
    track_next: bool,
    best: Vec<T>,
    best_distance: Option<usize>,
    next: Vec<T>,
    next_distance: Option<usize>,
}

impl<T> Tiers<T> {
    pub(crate) fn new(track_next: bool) -> Self {
        Self {
            track_next,
            best: Vec::new(),
            best_distance: None,
            next: Vec::new(),
            next_distance: None,
        }
    }

    /// Largest distance that can still enter a tier.
    pub(crate) fn bound(&self) -> Option<usize> {
        if self.track_next {
            self.next_distance
        } else {
            self.best_distance
        }
    }

    pub(crate) fn offer(&mut self, item: T, distance: usize) {
        match self.best_distance {
            Some(best) if distance == best => self.best.push(item),
            Some(best) if distance > best => self.offer_next(item, distance),
            previous => {
                if self.track_next && previous.is_some() {
                    self.next = std::mem::take(&mut self.best);
                    self.next_distance = previous;
                } else {
                    self.best.clear();
                }
                self.best.push(item);
                self.best_distance = Some(distance);
            }
        }
    }

    fn offer_next(&mut self, item: T, distance: usize) {
        if !self.track_next {
            return;
        }
        match self.next_distance {
            Some(next) if distance == next => self.next.push(item),
            Some(next) if distance > next => {}
            _ => {
                self.next.clear();
                self.next.push(item);
                self.next_distance = Some(distance);
            }
        }
    }

    /// Best tier first, then the next tier, each in offer order.
    pub(crate) fn into_vec(self) -> Vec<T> {
        let mut items = self.best;
        items.extend(self.next);
        items
    }
}

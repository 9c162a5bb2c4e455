use crate::header::registry::WordRegistry;

/// Which word is pinned, which one was pinned before it, and the order of
/// the pile.
///
/// Invariants held after every method returns:
/// - `pile_order` is a permutation of all ids minus `pinned`;
/// - `prev_pinned`, when set, names a registered word.
#[derive(Debug, Clone)]
pub struct HeaderState {
    all_ids: Vec<String>,
    pinned: Option<String>,
    prev_pinned: Option<String>,
    pile_order: Vec<String>,
}

impl HeaderState {
    /// Nothing pinned, pile in registry order.
    pub fn new(registry: &WordRegistry) -> Self {
        let all_ids = registry.ids();
        Self {
            pile_order: all_ids.clone(),
            all_ids,
            pinned: None,
            prev_pinned: None,
        }
    }

    /// Start from a previously saved pile order: saved ids first (unknown
    /// ones dropped), then any ids the save did not mention, in registry
    /// order.
    pub fn with_saved_order(registry: &WordRegistry, saved: &[String]) -> Self {
        let mut state = Self::new(registry);
        let mut order: Vec<String> = Vec::with_capacity(state.all_ids.len());
        for id in saved {
            if state.all_ids.contains(id) && !order.contains(id) {
                order.push(id.clone());
            }
        }
        for id in &state.all_ids {
            if !order.contains(id) {
                order.push(id.clone());
            }
        }
        state.pile_order = order;
        state
    }

    pub fn get_pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn prev_pinned(&self) -> Option<&str> {
        self.prev_pinned.as_deref()
    }

    pub fn pile_order(&self) -> &[String] {
        &self.pile_order
    }

    pub fn all_ids(&self) -> &[String] {
        &self.all_ids
    }

    /// Pin `slug`. The outgoing pinned word, if any and different, becomes
    /// the previous pin. Returns `false` (and changes nothing) for an
    /// unknown slug.
    pub fn set_pinned(&mut self, slug: &str) -> bool {
        if !self.all_ids.iter().any(|id| id == slug) {
            return false;
        }
        self.record_outgoing(Some(slug));
        self.arrange(Some(slug));
        true
    }

    /// Unpin for the home route: the outgoing word is remembered as the
    /// previous pin and returns to the pile.
    pub fn unpin(&mut self) {
        self.record_outgoing(None);
        self.arrange(None);
    }

    /// Unmapped route: nothing pinned, every word back in the pile in
    /// registry order, no reordering bias applied.
    pub fn reset(&mut self) {
        self.pinned = None;
        self.pile_order = self.all_ids.clone();
    }

    /// The pile followed by the currently pinned word.
    pub fn working_order(&self) -> Vec<String> {
        let mut order = self.pile_order.clone();
        if let Some(pinned) = &self.pinned {
            order.push(pinned.clone());
        }
        order
    }

    fn record_outgoing(&mut self, incoming: Option<&str>) {
        if let Some(out) = self.pinned.as_deref() {
            if Some(out) != incoming {
                self.prev_pinned = Some(out.to_string());
            }
        }
    }

    /// Move the previous pin to the front of the working order, then split
    /// off `target`.
    fn arrange(&mut self, target: Option<&str>) {
        let mut working = self.working_order();
        if let Some(prev) = self.prev_pinned.as_deref() {
            if let Some(idx) = working.iter().position(|id| id == prev) {
                let id = working.remove(idx);
                working.insert(0, id);
            }
        }
        self.pinned = target.map(str::to_string);
        self.pile_order = working
            .into_iter()
            .filter(|id| Some(id.as_str()) != target)
            .collect();
        debug_assert_eq!(
            self.pile_order.len() + usize::from(self.pinned.is_some()),
            self.all_ids.len()
        );
    }
}

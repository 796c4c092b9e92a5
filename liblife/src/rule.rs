/// Neighbor counts that cause a dead cell to be born or a live cell to survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    pub fn conway() -> Self {
        Self::default()
    }

    pub fn next_state(&self, alive: bool, alive_neighbor_count: usize) -> bool {
        if alive {
            self.survive.contains(&alive_neighbor_count)
        } else {
            self.birth.contains(&alive_neighbor_count)
        }
    }
}

// B3/S23
impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

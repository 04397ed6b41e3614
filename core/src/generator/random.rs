use super::*;

/// Seeded generator placing mines uniformly at random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    strategy: PlacementStrategy,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, strategy: PlacementStrategy) -> Self {
        Self { seed, strategy }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, mines: CellCount) -> MineLayout {
        use rand::prelude::*;

        let mines = if mines > GRID_SIZE {
            log::warn!(
                "Board already full, requested {} mines but only {} fit",
                mines,
                GRID_SIZE
            );
            GRID_SIZE
        } else {
            mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let side = GRID_SIDE as usize;
        let mut mine_mask: Array2<bool> = Array2::default((side, side));

        match self.strategy {
            PlacementStrategy::Rejection => {
                let mut placed: CellCount = 0;
                let mut draws: u32 = 0;
                while placed < mines {
                    let index: CellIndex = rng.random_range(0..GRID_SIZE);
                    draws += 1;
                    let cell = &mut mine_mask[index.to_nd_index()];
                    if !*cell {
                        *cell = true;
                        placed += 1;
                    }
                }
                log::trace!("Placed {} mines in {} draws", mines, draws);
            }
            PlacementStrategy::PartialShuffle => {
                let mut cells: [CellIndex; GRID_SIZE as usize] =
                    core::array::from_fn(|i| i as CellIndex);
                for i in 0..usize::from(mines) {
                    let j = rng.random_range(i..cells.len());
                    cells.swap(i, j);
                }
                for &index in &cells[..usize::from(mines)] {
                    mine_mask[index.to_nd_index()] = true;
                }
            }
        }

        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                mines
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [PlacementStrategy; 2] = [
        PlacementStrategy::Rejection,
        PlacementStrategy::PartialShuffle,
    ];

    #[test]
    fn every_valid_mine_count_is_placed_exactly() {
        for strategy in STRATEGIES {
            for mines in 1..=MAX_MINES {
                for seed in 0..32 {
                    let layout = RandomLayoutGenerator::new(seed, strategy).generate(mines);
                    let indices = layout.mine_indices();

                    assert_eq!(layout.mine_count(), mines, "{strategy:?} seed {seed}");
                    assert_eq!(indices.len(), usize::from(mines));
                    assert_eq!(layout.safe_cell_count(), GRID_SIZE - mines);
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        for strategy in STRATEGIES {
            let a = RandomLayoutGenerator::new(42, strategy).generate(5);
            let b = RandomLayoutGenerator::new(42, strategy).generate(5);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn seeds_spread_mines_across_the_board() {
        let mut hit = [false; GRID_SIZE as usize];
        for seed in 0..1000 {
            let layout =
                RandomLayoutGenerator::new(seed, PlacementStrategy::Rejection).generate(1);
            for index in layout.mine_indices() {
                hit[usize::from(index)] = true;
            }
        }
        assert!(hit.iter().all(|&h| h));
    }
}

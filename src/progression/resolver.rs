//! Progression resolver
//!
//! Given a category name, decides whether the category is locked and which
//! of its boards to serve. Rules:
//! - The first category is never locked.
//! - Any other category is locked while the previous category's stored
//!   index is below that category's board count. A previous category with
//!   no boards keeps its successor locked forever.
//! - A category that was never played starts at index 0, and that 0 is
//!   written back right away.
//! - A stored index outside `[0, board_count)` serves a uniformly random
//!   board instead of failing.

use rand::Rng;

use crate::board::BoardDefinition;
use crate::catalog::{BoardCatalog, Category};
use crate::error::{Error, Result};
use crate::persistence::ProgressStore;
use crate::progression::publisher::{progress_fraction, progress_label};

/// How the served board index was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// Stored index was in range
    Stored,
    /// No stored index; 0 was used and persisted
    Initialized,
    /// Stored index was out of range; a random board was served
    RandomFallback { stored: i32 },
}

/// The board chosen for a category
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub category: String,
    /// Position of the category in the catalog
    pub ordinal: usize,
    /// Board index actually served
    pub index: usize,
    /// Boards in the category
    pub total: usize,
    pub board: BoardDefinition,
    pub source: IndexSource,
}

/// Selection plus lock state for UI consumption
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub selection: SelectionResult,
    pub locked: bool,
}

/// Menu entry for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStatus {
    pub name: String,
    pub ordinal: usize,
    pub locked: bool,
    /// Stored progress (negative values shown as 0)
    pub current_index: usize,
    pub total: usize,
    /// `"current/total"`, empty while locked
    pub label: String,
    pub fraction: f32,
}

impl CategoryStatus {
    /// Whether the category can be entered right now
    pub fn playable(&self) -> bool {
        !self.locked && self.total > 0
    }
}

/// Lock state of the category at `ordinal`
pub fn is_locked<S>(catalog: &BoardCatalog, ordinal: usize, store: &S) -> bool
where
    S: ProgressStore + ?Sized,
{
    let Some(previous) = ordinal.checked_sub(1).and_then(|i| catalog.category_at(i)) else {
        return false;
    };
    if previous.is_empty() {
        return true;
    }
    match store.read_index(&previous.name) {
        Some(index) => usize::try_from(index).map_or(true, |i| i < previous.board_count()),
        None => true,
    }
}

/// Look up a category and its ordinal, rejecting empty categories
fn playable_category<'a>(catalog: &'a BoardCatalog, name: &str) -> Result<(usize, &'a Category)> {
    let ordinal = catalog
        .position(name)
        .ok_or_else(|| Error::CategoryNotFound(name.to_string()))?;
    let category = &catalog.categories()[ordinal];
    if category.is_empty() {
        return Err(Error::NoContent(name.to_string()));
    }
    Ok((ordinal, category))
}

/// Read the stored index, initializing it to 0 on first visit
///
/// Returns `None` when the index was just initialized.
fn touch_index<S>(name: &str, store: &mut S) -> Result<Option<i32>>
where
    S: ProgressStore + ?Sized,
{
    match store.read_index(name) {
        Some(index) => Ok(Some(index)),
        None => {
            store.write_index(name, 0)?;
            log::debug!("First visit to {}, progress initialized to 0", name);
            Ok(None)
        }
    }
}

/// Resolve the board to serve for `name`
pub fn resolve<S, R>(
    name: &str,
    catalog: &BoardCatalog,
    store: &mut S,
    rng: &mut R,
) -> Result<Resolution>
where
    S: ProgressStore + ?Sized,
    R: Rng,
{
    let (ordinal, category) = playable_category(catalog, name)?;
    let locked = is_locked(catalog, ordinal, &*store);
    let total = category.board_count();

    let (index, source) = match touch_index(name, store)? {
        None => (0, IndexSource::Initialized),
        Some(stored) => match usize::try_from(stored) {
            Ok(i) if i < total => (i, IndexSource::Stored),
            _ => {
                let index = rng.random_range(0..total);
                log::warn!(
                    "Stored index {} out of range for {} ({} boards), serving random board {}",
                    stored,
                    name,
                    total,
                    index
                );
                (index, IndexSource::RandomFallback { stored })
            }
        },
    };

    log::debug!(
        "Resolved {}: board {}/{} (locked: {}, source: {:?})",
        name,
        index,
        total,
        locked,
        source
    );

    Ok(Resolution {
        selection: SelectionResult {
            category: category.name.clone(),
            ordinal,
            index,
            total,
            board: category.board_at(index)?.clone(),
            source,
        },
        locked,
    })
}

/// Resolve `name` for play, failing if it is locked
pub fn enter<S, R>(
    name: &str,
    catalog: &BoardCatalog,
    store: &mut S,
    rng: &mut R,
) -> Result<SelectionResult>
where
    S: ProgressStore + ?Sized,
    R: Rng,
{
    let resolution = resolve(name, catalog, store, rng)?;
    if resolution.locked {
        return Err(Error::Locked(name.to_string()));
    }
    Ok(resolution.selection)
}

/// Resolve the first category worth playing
///
/// Prefers the first unlocked category that still has unplayed boards,
/// then the first unlocked category with any boards. Empty and locked
/// categories are skipped without touching the store.
pub fn first_playable<S, R>(catalog: &BoardCatalog, store: &mut S, rng: &mut R) -> Result<Resolution>
where
    S: ProgressStore + ?Sized,
    R: Rng,
{
    let open: Vec<&Category> = catalog
        .categories()
        .iter()
        .enumerate()
        .filter(|(ordinal, c)| !c.is_empty() && !is_locked(catalog, *ordinal, &*store))
        .map(|(_, c)| c)
        .collect();

    let unfinished = open.iter().find(|c| match store.read_index(&c.name) {
        Some(index) => usize::try_from(index).map_or(true, |i| i < c.board_count()),
        None => true,
    });

    match unfinished.or(open.first()) {
        Some(category) => resolve(&category.name, catalog, store, rng),
        None => Err(Error::NothingToPlay),
    }
}

/// Menu information for one category
///
/// Initializes a never-played category's index like [`resolve`] does;
/// empty categories are reported without a store write.
pub fn category_status<S>(name: &str, catalog: &BoardCatalog, store: &mut S) -> Result<CategoryStatus>
where
    S: ProgressStore + ?Sized,
{
    let ordinal = catalog
        .position(name)
        .ok_or_else(|| Error::CategoryNotFound(name.to_string()))?;
    let category = &catalog.categories()[ordinal];
    let total = category.board_count();

    let stored = if category.is_empty() {
        store.read_index(name).unwrap_or(0)
    } else {
        touch_index(name, store)?.unwrap_or(0)
    };
    let current_index = usize::try_from(stored).unwrap_or(0);
    let locked = is_locked(catalog, ordinal, &*store);

    Ok(CategoryStatus {
        name: category.name.clone(),
        ordinal,
        locked,
        current_index,
        total,
        label: progress_label(current_index, total, locked),
        fraction: progress_fraction(current_index, total),
    })
}

/// Menu information for every category, in catalog order
pub fn menu<S>(catalog: &BoardCatalog, store: &mut S) -> Result<Vec<CategoryStatus>>
where
    S: ProgressStore + ?Sized,
{
    catalog
        .categories()
        .iter()
        .map(|c| category_status(&c.name, catalog, store))
        .collect()
}

/// Advance progress after the served board was solved
///
/// Stored progress never moves backwards, so replaying a random board from
/// an exhausted category keeps it exhausted. Returns the index now stored.
pub fn record_completion<S>(selection: &SelectionResult, store: &mut S) -> Result<i32>
where
    S: ProgressStore + ?Sized,
{
    let next = i32::try_from(selection.index + 1)
        .map_err(|_| Error::Store(format!("board index {} overflows", selection.index)))?;

    match store.read_index(&selection.category) {
        Some(current) if current >= next => {
            log::debug!(
                "Completed {} board {}, progress stays at {}",
                selection.category,
                selection.index,
                current
            );
            Ok(current)
        }
        _ => {
            store.write_index(&selection.category, next)?;
            if selection.total > 0 && next as usize >= selection.total {
                log::info!("Category {} completed", selection.category);
            }
            Ok(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board(tag: usize) -> BoardDefinition {
        let mut board = BoardDefinition::new(2, 2);
        board.add_word(format!("W{tag}"));
        board
    }

    fn category(name: &str, count: usize) -> Category {
        Category::new(name, (0..count).map(board).collect())
    }

    fn catalog(spec: &[(&str, usize)]) -> BoardCatalog {
        BoardCatalog::new(spec.iter().map(|&(n, c)| category(n, c)).collect()).unwrap()
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_first_visit_scenario() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2)]);
        let mut store = MemoryStore::new();

        let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert!(!res.locked);
        assert_eq!(res.selection.index, 0);
        assert_eq!(res.selection.total, 3);
        assert_eq!(res.selection.board, board(0));
        assert_eq!(res.selection.source, IndexSource::Initialized);
        assert_eq!(store.read_index("Animals"), Some(0));
        assert_eq!(store.write_count(), 1);

        let res = resolve("Colors", &catalog, &mut store, &mut rng()).unwrap();
        assert!(res.locked);
        assert_eq!(res.selection.ordinal, 1);
    }

    #[test]
    fn test_unset_initialized_exactly_once() {
        let catalog = catalog(&[("Animals", 3)]);
        let mut store = MemoryStore::new();

        resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.source, IndexSource::Stored);
        assert_eq!(res.selection.index, 0);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_failed_first_visit_write_is_retried() {
        use crate::persistence::JsonFileStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("progress.json");
        let catalog = catalog(&[("Animals", 3)]);
        let mut store = JsonFileStore::open(&path).unwrap();

        assert!(resolve("Animals", &catalog, &mut store, &mut rng()).is_err());
        assert_eq!(store.read_index("Animals"), None);
        assert!(resolve("Animals", &catalog, &mut store, &mut rng()).is_err());

        std::fs::create_dir(dir.path().join("missing_dir")).unwrap();
        let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.source, IndexSource::Initialized);
        assert!(path.exists());
    }

    #[test]
    fn test_empty_category_no_content() {
        let catalog = catalog(&[("Empty", 0), ("Animals", 1)]);
        let mut store = MemoryStore::new();

        let err = resolve("Empty", &catalog, &mut store, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::NoContent(name) if name == "Empty"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_unknown_category() {
        let catalog = catalog(&[("Animals", 1)]);
        let mut store = MemoryStore::new();
        let err = resolve("Fruit", &catalog, &mut store, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::CategoryNotFound(name) if name == "Fruit"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_out_of_range_falls_back_to_random() {
        let catalog = catalog(&[("Animals", 3)]);
        let mut store = MemoryStore::with_records([("Animals", 7)]);

        let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert!(res.selection.index < 3);
        assert_eq!(res.selection.source, IndexSource::RandomFallback { stored: 7 });
        assert_eq!(res.selection.board, board(res.selection.index));
        assert_eq!(store.read_index("Animals"), Some(7));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_explicit_negative_is_out_of_range() {
        let catalog = catalog(&[("Animals", 3)]);
        let mut store = MemoryStore::with_records([("Animals", -1)]);

        let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.source, IndexSource::RandomFallback { stored: -1 });
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_random_fallback_is_uniform() {
        let catalog = catalog(&[("Animals", 5)]);
        let mut store = MemoryStore::with_records([("Animals", 99)]);
        let mut rng = rng();
        let mut counts = [0usize; 5];

        for _ in 0..10_000 {
            let res = resolve("Animals", &catalog, &mut store, &mut rng).unwrap();
            counts[res.selection.index] += 1;
        }
        for (index, &count) in counts.iter().enumerate() {
            assert!(
                (1800..=2200).contains(&count),
                "index {index} selected {count} times"
            );
        }
    }

    #[test]
    fn test_first_category_never_locked() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2)]);
        for stored in [None, Some(-5), Some(0), Some(100)] {
            let mut store = match stored {
                Some(i) => MemoryStore::with_records([("Animals", i)]),
                None => MemoryStore::new(),
            };
            let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
            assert!(!res.locked, "stored {stored:?}");
        }
    }

    #[test]
    fn test_lock_follows_previous_category() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2), ("Shapes", 1)]);
        let cases = [(None, true), (Some(-1), true), (Some(2), true), (Some(3), false), (Some(9), false)];
        for (animals, locked) in cases {
            let store = match animals {
                Some(i) => MemoryStore::with_records([("Animals", i)]),
                None => MemoryStore::new(),
            };
            assert_eq!(is_locked(&catalog, 1, &store), locked, "Animals = {animals:?}");
            // Shapes depends on Colors only
            assert!(is_locked(&catalog, 2, &store));
        }
    }

    #[test]
    fn test_empty_previous_category_locks_successor() {
        let catalog = catalog(&[("Empty", 0), ("Animals", 2)]);
        let store = MemoryStore::with_records([("Empty", 0)]);
        assert!(is_locked(&catalog, 1, &store));
    }

    #[test]
    fn test_enter_locked_category() {
        let catalog = catalog(&[("Animals", 1), ("Colors", 1)]);
        let mut store = MemoryStore::new();
        let err = enter("Colors", &catalog, &mut store, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::Locked(name) if name == "Colors"));

        store.write_index("Animals", 1).unwrap();
        let selection = enter("Colors", &catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(selection.category, "Colors");
    }

    #[test]
    fn test_completing_category_unlocks_next() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2)]);
        let mut store = MemoryStore::new();

        for expected in 0..3 {
            let selection = enter("Animals", &catalog, &mut store, &mut rng()).unwrap();
            assert_eq!(selection.index, expected);
            assert!(is_locked(&catalog, 1, &store));
            assert_eq!(record_completion(&selection, &mut store).unwrap(), expected as i32 + 1);
        }

        assert!(!is_locked(&catalog, 1, &store));
        let res = resolve("Colors", &catalog, &mut store, &mut rng()).unwrap();
        assert!(!res.locked);
        assert_eq!(res.selection.index, 0);
    }

    #[test]
    fn test_replay_does_not_regress_progress() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2)]);
        let mut store = MemoryStore::with_records([("Animals", 3)]);

        let selection = enter("Animals", &catalog, &mut store, &mut rng()).unwrap();
        assert!(matches!(selection.source, IndexSource::RandomFallback { stored: 3 }));
        assert_eq!(record_completion(&selection, &mut store).unwrap(), 3);
        assert_eq!(store.read_index("Animals"), Some(3));
        assert!(!is_locked(&catalog, 1, &store));
    }

    #[test]
    fn test_first_playable_skips_empty_and_finished() {
        let catalog = catalog(&[("Empty", 0), ("Animals", 2), ("Colors", 2)]);
        let mut store = MemoryStore::new();

        // Animals is locked behind the empty category, nothing to play
        assert!(matches!(
            first_playable(&catalog, &mut store, &mut rng()),
            Err(Error::NothingToPlay)
        ));
        assert_eq!(store.write_count(), 0);

        let catalog = self::catalog(&[("Animals", 2), ("Empty", 0), ("Colors", 2)]);
        let res = first_playable(&catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.category, "Animals");

        store.write_index("Animals", 2).unwrap();
        // Empty locks Colors, so the finished Animals is replayed
        let res = first_playable(&catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.category, "Animals");
        assert!(matches!(res.selection.source, IndexSource::RandomFallback { stored: 2 }));
    }

    #[test]
    fn test_first_playable_moves_on_after_completion() {
        let catalog = catalog(&[("Animals", 1), ("Colors", 2)]);
        let mut store = MemoryStore::with_records([("Animals", 1)]);
        let res = first_playable(&catalog, &mut store, &mut rng()).unwrap();
        assert_eq!(res.selection.category, "Colors");
        assert_eq!(res.selection.source, IndexSource::Initialized);
    }

    #[test]
    fn test_menu_status() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2), ("Empty", 0)]);
        let mut store = MemoryStore::with_records([("Animals", 3)]);

        let entries = menu(&catalog, &mut store).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].label, "3/3");
        assert_eq!(entries[0].fraction, 1.0);
        assert!(entries[0].playable());

        assert!(!entries[1].locked);
        assert_eq!(entries[1].label, "0/2");
        assert_eq!(entries[1].fraction, 0.0);
        assert_eq!(store.read_index("Colors"), Some(0));

        assert!(entries[2].locked);
        assert_eq!(entries[2].label, "");
        assert!(!entries[2].playable());
        assert_eq!(store.read_index("Empty"), None);
    }

    #[test]
    fn test_locked_status_has_empty_label() {
        let catalog = catalog(&[("Animals", 3), ("Colors", 2)]);
        let mut store = MemoryStore::new();
        let status = category_status("Colors", &catalog, &mut store).unwrap();
        assert!(status.locked);
        assert!(status.label.is_empty());
        assert_eq!(status.fraction, 0.0);
    }

    proptest! {
        #[test]
        fn prop_valid_index_selects_that_board(count in 1usize..20, pick in 0usize..20) {
            let index = pick % count;
            let catalog = catalog(&[("Animals", count)]);
            let mut store = MemoryStore::with_records([("Animals", index as i32)]);

            let res = resolve("Animals", &catalog, &mut store, &mut rng()).unwrap();
            prop_assert_eq!(res.selection.index, index);
            prop_assert_eq!(&res.selection.board, catalog.board_at("Animals", index).unwrap());
            prop_assert_eq!(res.selection.source, IndexSource::Stored);
            prop_assert_eq!(store.write_count(), 0);
        }

        #[test]
        fn prop_lock_matches_previous_progress(count in 1usize..10, stored in -5i32..15) {
            let catalog = catalog(&[("Animals", count), ("Colors", 1)]);
            let mut store = MemoryStore::with_records([("Animals", stored)]);
            let res = resolve("Colors", &catalog, &mut store, &mut rng()).unwrap();
            prop_assert_eq!(res.locked, (stored as i64) < count as i64);
        }
    }
}

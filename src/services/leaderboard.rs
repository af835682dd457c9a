//! Reduces voting history into per-movie rankings.
//!
//! A movie *appears* in a comparison when either side's set contains it,
//! counted once per comparison. It *wins* once for every vote cast for a set
//! that contains it. Movies that never appeared are left out.

use crate::models::leaderboard::{LeaderboardSnapshot, MovieRanking};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: i64,
    appearances: i64,
}

fn members_of(snapshot: &LeaderboardSnapshot, set_id: i32) -> impl Iterator<Item = i32> + '_ {
    snapshot
        .set_members
        .get(&set_id)
        .into_iter()
        .flatten()
        .copied()
}

fn tally(snapshot: &LeaderboardSnapshot) -> HashMap<i32, Tally> {
    let mut tallies: HashMap<i32, Tally> = HashMap::new();

    for pairing in &snapshot.pairings {
        let present: HashSet<i32> = members_of(snapshot, pairing.set_a_id)
            .chain(members_of(snapshot, pairing.set_b_id))
            .collect();
        for movie_id in present {
            tallies.entry(movie_id).or_default().appearances += 1;
        }
    }

    for (&set_id, &votes) in &snapshot.votes_by_set {
        let members: HashSet<i32> = members_of(snapshot, set_id).collect();
        for movie_id in members {
            // Votes for sets that never appeared in a comparison cannot exist,
            // but stay consistent with the appearance count if they do.
            if let Some(t) = tallies.get_mut(&movie_id) {
                t.wins += votes;
            }
        }
    }

    tallies
}

fn compare(a: &MovieRanking, b: &MovieRanking) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.win_rate.total_cmp(&a.win_rate))
        .then_with(|| b.appearances.cmp(&a.appearances))
        .then_with(|| a.movie.id.cmp(&b.movie.id))
}

/// Ranks movies by wins, then win rate, then appearances, then id, and
/// keeps at most `limit` rows. Ids that no longer resolve to a movie are
/// skipped before ranking.
#[must_use]
pub fn rank_items(snapshot: &LeaderboardSnapshot, limit: usize) -> Vec<MovieRanking> {
    let mut rows: Vec<MovieRanking> = tally(snapshot)
        .into_iter()
        .filter(|(_, t)| t.appearances > 0)
        .filter_map(|(movie_id, t)| {
            let movie = snapshot.movies.get(&movie_id)?.clone();
            #[allow(clippy::cast_precision_loss)]
            let win_rate = t.wins as f64 / t.appearances as f64;
            Some(MovieRanking {
                rank: 0,
                movie,
                wins: t.wins,
                appearances: t.appearances,
                win_rate,
            })
        })
        .collect();

    rows.sort_by(compare);
    rows.truncate(limit);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::leaderboard::ComparisonPairing;
    use crate::models::movie::Movie;

    fn movie(id: i32) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: 2000 + id,
            director: None,
            poster: None,
            genres: Vec::new(),
        }
    }

    fn snapshot() -> LeaderboardSnapshot {
        let mut s = LeaderboardSnapshot::default();
        s.set_members.insert(1, vec![1, 2, 3, 4]);
        s.set_members.insert(2, vec![5, 6, 7, 8]);
        s.set_members.insert(3, vec![9, 10, 11, 12]);
        s.pairings.push(ComparisonPairing {
            comparison_id: 1,
            set_a_id: 1,
            set_b_id: 2,
        });
        s.votes_by_set.insert(1, 3);
        s.votes_by_set.insert(2, 1);
        for id in 1..=12 {
            s.movies.insert(id, movie(id));
        }
        s
    }

    #[test]
    fn winners_rank_above_losers() {
        let rows = rank_items(&snapshot(), 100);

        assert_eq!(rows.len(), 8);
        for row in &rows[..4] {
            assert!((1..=4).contains(&row.movie.id));
            assert_eq!(row.wins, 3);
            assert_eq!(row.appearances, 1);
        }
        for row in &rows[4..] {
            assert!((5..=8).contains(&row.movie.id));
            assert_eq!(row.wins, 1);
        }
        assert_eq!(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            (1..=8).collect::<Vec<_>>()
        );
    }

    #[test]
    fn never_compared_movies_are_excluded() {
        let rows = rank_items(&snapshot(), 100);
        assert!(rows.iter().all(|r| r.movie.id < 9));
    }

    #[test]
    fn ties_fall_back_to_id() {
        let rows = rank_items(&snapshot(), 100);
        let ids: Vec<i32> = rows.iter().map(|r| r.movie.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn appearances_sum_to_members_per_comparison() {
        let mut s = snapshot();
        s.pairings.push(ComparisonPairing {
            comparison_id: 2,
            set_a_id: 1,
            set_b_id: 3,
        });

        let rows = rank_items(&s, 100);
        let total: i64 = rows.iter().map(|r| r.appearances).sum();
        // Two comparisons, eight distinct movies each
        assert_eq!(total, 16);
    }

    #[test]
    fn shared_movie_counts_once_per_comparison() {
        let mut s = LeaderboardSnapshot::default();
        s.set_members.insert(1, vec![1, 2, 3, 4]);
        s.set_members.insert(2, vec![4, 5, 6, 7]);
        s.pairings.push(ComparisonPairing {
            comparison_id: 1,
            set_a_id: 1,
            set_b_id: 2,
        });
        s.votes_by_set.insert(1, 2);
        s.votes_by_set.insert(2, 1);
        for id in 1..=7 {
            s.movies.insert(id, movie(id));
        }

        let rows = rank_items(&s, 100);
        let shared = rows.iter().find(|r| r.movie.id == 4).unwrap();
        assert_eq!(shared.appearances, 1);
        assert_eq!(shared.wins, 3);
        assert_eq!(rows[0].movie.id, 4);
    }

    #[test]
    fn unresolvable_movies_are_skipped() {
        let mut s = snapshot();
        s.movies.remove(&2);

        let rows = rank_items(&s, 100);
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.movie.id != 2));
        assert_eq!(rows[0].rank, 1);
    }

    #[test]
    fn limit_truncates() {
        let rows = rank_items(&snapshot(), 3);
        assert_eq!(rows.len(), 3);
        assert!(rank_items(&snapshot(), 0).is_empty());
    }

    #[test]
    fn no_history_means_empty_board() {
        assert!(rank_items(&LeaderboardSnapshot::default(), 10).is_empty());
    }
}

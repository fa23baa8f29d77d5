//! Scoring policies for solo and duel play.

use crate::error::PuzzleError;
use crate::types::{Team, TeamConfig, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Points for a solo find.
pub const DEFAULT_POINTS_PER_WORD: u32 = 10;

/// Points per letter for a duel find.
pub const DEFAULT_POINTS_PER_LETTER: u32 = 10;

/// Points awarded for a single successful match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Points added.
    pub points: u32,
    /// Team that received them (duel only).
    pub team: Option<TeamId>,
}

/// Final scores, shaped by the mode that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSummary {
    /// Single running score.
    Solo {
        /// Total points.
        score: u32,
    },
    /// Per-team results.
    Duel {
        /// Teams ordered by score, highest first; ties keep team order.
        standings: Vec<Team>,
        /// First team with the highest score.
        winner: Option<TeamId>,
    },
}

impl ScoreSummary {
    /// Solo score, or the winning team's score in a duel.
    pub fn top_score(&self) -> u32 {
        match self {
            ScoreSummary::Solo { score } => *score,
            ScoreSummary::Duel { standings, .. } => {
                standings.first().map(|t| *t.score()).unwrap_or(0)
            }
        }
    }
}

/// Rule set deciding how a successful match changes score and turn state.
///
/// Failed attempts never reach the policy.
pub trait ScoringPolicy {
    /// Credits a match of `word` and advances any turn state.
    fn credit(&mut self, word: &str) -> Credit;

    /// Team whose turn it is, if the policy has turns.
    fn active_team(&self) -> Option<&Team>;

    /// Sum of all points awarded so far.
    fn total_points(&self) -> u32;

    /// Snapshot of the current scores.
    fn summary(&self) -> ScoreSummary;
}

/// Flat points per word, one running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoloScoring {
    score: u32,
    points_per_word: u32,
}

impl SoloScoring {
    /// Creates a solo policy awarding `points_per_word` per find.
    pub fn new(points_per_word: u32) -> Self {
        Self {
            score: 0,
            points_per_word,
        }
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points awarded per find.
    pub fn points_per_word(&self) -> u32 {
        self.points_per_word
    }
}

impl Default for SoloScoring {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_WORD)
    }
}

impl ScoringPolicy for SoloScoring {
    fn credit(&mut self, _word: &str) -> Credit {
        self.score = self.score.saturating_add(self.points_per_word);
        Credit {
            points: self.points_per_word,
            team: None,
        }
    }

    fn active_team(&self) -> Option<&Team> {
        None
    }

    fn total_points(&self) -> u32 {
        self.score
    }

    fn summary(&self) -> ScoreSummary {
        ScoreSummary::Solo { score: self.score }
    }
}

/// Per-letter points credited to the active team, with round-robin turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelScoring {
    teams: Vec<Team>,
    active: usize,
    points_per_letter: u32,
}

impl DuelScoring {
    /// Creates a duel policy. The first team moves first.
    #[instrument(skip(teams), fields(teams = teams.len()))]
    pub fn new(teams: Vec<TeamConfig>, points_per_letter: u32) -> Result<Self, PuzzleError> {
        if teams.is_empty() {
            return Err(PuzzleError::NoTeams);
        }
        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(team.id.clone()) {
                return Err(PuzzleError::DuplicateTeam(team.id.to_string()));
            }
        }
        Ok(Self {
            teams: teams.into_iter().map(Team::from).collect(),
            active: 0,
            points_per_letter,
        })
    }

    /// All teams in configured order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Index of the team whose turn it is.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// First team holding the maximum score.
    pub fn leader(&self) -> Option<&Team> {
        self.teams.iter().fold(None, |best: Option<&Team>, team| match best {
            Some(b) if b.score() >= team.score() => Some(b),
            _ => Some(team),
        })
    }

    /// Teams sorted by score, highest first, ties in configured order.
    pub fn standings(&self) -> Vec<Team> {
        let mut standings = self.teams.clone();
        standings.sort_by(|a, b| b.score().cmp(a.score()));
        standings
    }
}

impl ScoringPolicy for DuelScoring {
    fn credit(&mut self, word: &str) -> Credit {
        let letters = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        let points = letters.saturating_mul(self.points_per_letter);
        let team = &mut self.teams[self.active];
        team.credit(word, points);
        let credited = team.id().clone();

        self.active = (self.active + 1) % self.teams.len();
        debug!(team = %credited, points, next = self.active, "Duel credit");

        Credit {
            points,
            team: Some(credited),
        }
    }

    fn active_team(&self) -> Option<&Team> {
        self.teams.get(self.active)
    }

    fn total_points(&self) -> u32 {
        self.teams.iter().map(|t| *t.score()).sum()
    }

    fn summary(&self) -> ScoreSummary {
        ScoreSummary::Duel {
            standings: self.standings(),
            winner: self.leader().map(|t| t.id().clone()),
        }
    }
}

/// The policy chosen when a session is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scoring {
    /// Solo hunt.
    Solo(SoloScoring),
    /// Team duel.
    Duel(DuelScoring),
}

impl Scoring {
    fn policy(&self) -> &dyn ScoringPolicy {
        match self {
            Scoring::Solo(p) => p,
            Scoring::Duel(p) => p,
        }
    }

    fn policy_mut(&mut self) -> &mut dyn ScoringPolicy {
        match self {
            Scoring::Solo(p) => p,
            Scoring::Duel(p) => p,
        }
    }

    /// Duel state, if this is a duel.
    pub fn duel(&self) -> Option<&DuelScoring> {
        match self {
            Scoring::Duel(p) => Some(p),
            Scoring::Solo(_) => None,
        }
    }
}

impl ScoringPolicy for Scoring {
    fn credit(&mut self, word: &str) -> Credit {
        self.policy_mut().credit(word)
    }

    fn active_team(&self) -> Option<&Team> {
        self.policy().active_team()
    }

    fn total_points(&self) -> u32 {
        self.policy().total_points()
    }

    fn summary(&self) -> ScoreSummary {
        self.policy().summary()
    }
}

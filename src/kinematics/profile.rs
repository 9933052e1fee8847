use crate::kinematics::ProfileError;
use crate::kinematics::piece::{DOMAIN_EPSILON, Piece};

use smallvec::SmallVec;

/// A speed-over-distance curve: ordered, gapless pieces covering `[0, L]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pieces: SmallVec<[Piece; 4]>,
}

impl Profile {
    /// Collects pieces into a profile, dropping any which span no distance.
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Self {
        Profile {
            pieces: pieces
                .into_iter()
                .filter(|piece| piece.length() > DOMAIN_EPSILON)
                .collect(),
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Length `L` of the route the profile spans.
    pub fn length(&self) -> f64 {
        self.pieces.last().map_or(0.0, |piece| piece.end)
    }

    /// Speed at the very end of the profile.
    pub fn end_speed(&self) -> Option<f64> {
        self.pieces.last().map(|piece| piece.end_speed)
    }

    /// Speed at `x`. Positions outside of `[0, L]` are an error.
    pub fn speed_at(&self, x: f64) -> Result<f64, ProfileError> {
        let piece = self
            .pieces
            .iter()
            .find(|piece| piece.contains(x))
            .ok_or(ProfileError::OutOfRange {
                x,
                length: self.length(),
            })?;

        piece
            .speed_at(x)
            .ok_or(ProfileError::NegativeRadicand { x })
    }

    /// Time needed to traverse the whole profile, the integral of `1 / U(x)`.
    ///
    /// `None` if any piece's speed is not a real number; infinite if any
    /// piece holds the vehicle at standstill.
    pub fn minimum_traversal_time(&self) -> Option<f64> {
        self.pieces
            .iter()
            .try_fold(0.0, |total, piece| Some(total + piece.traversal_time()?))
    }

    /// The prefix of the profile covering `[0, x]`.
    pub fn truncated_up_to(&self, x: f64) -> Profile {
        let mut prefix: SmallVec<[Piece; 4]> = SmallVec::new();

        for piece in &self.pieces {
            if x >= piece.end {
                prefix.push(*piece);
            } else {
                if x > piece.start {
                    if let Some(truncated) = piece.truncated(x) {
                        prefix.push(truncated);
                    }
                }
                break;
            }
        }

        Profile::from_pieces(prefix)
    }

    /// First position along the profile where `other` crosses it.
    pub fn intersection_with(&self, other: &Piece) -> Option<f64> {
        self.pieces
            .iter()
            .find_map(|piece| other.intersection(piece))
    }

    pub(crate) fn push(&mut self, piece: Piece) {
        if piece.length() > DOMAIN_EPSILON {
            self.pieces.push(piece);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Piece> {
        self.pieces.pop()
    }
}

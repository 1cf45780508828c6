//! Client for the remote game broker.
//!
//! Two engine instances can play each other across machines through a tiny
//! REST relay: each instance POSTs its own moves and polls with GET for the
//! opponent's. The broker echoes accepted moves back and tags each with the
//! turn number, so a poll for the wrong turn is simply ignored. Transport
//! problems are never fatal to the session: they are logged and the poll is
//! retried.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::core::{Coord, CoordPair};

/// How long a single broker request may take before it is abandoned.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Cell {
    row: i8,
    col: i8,
}

/// The wire representation of one move: source, destination and the 1-based
/// sequence number of the turn it was played on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct BrokerMove {
    from: Cell,
    to: Cell,
    turn: u16,
}

impl BrokerMove {
    const fn new(mv: CoordPair, turn: u16) -> Self {
        Self {
            from: Cell {
                row: mv.src.row,
                col: mv.src.col,
            },
            to: Cell {
                row: mv.dst.row,
                col: mv.dst.col,
            },
            turn,
        }
    }

    const fn as_move(self) -> CoordPair {
        CoordPair::new(
            Coord::new(self.from.row, self.from.col),
            Coord::new(self.to.row, self.to.col),
        )
    }
}

/// Every broker response wraps the payload in an envelope with a success
/// flag; GET responses carry no data until the opponent has moved.
#[derive(Debug, Deserialize)]
struct Reply {
    success: bool,
    data: Option<BrokerMove>,
}

/// A blocking client bound to one broker URL.
pub struct Broker {
    url: String,
    agent: ureq::Agent,
}

impl Broker {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(url: String) -> Self {
        Self {
            url,
            agent: ureq::AgentBuilder::new()
                .timeout(REQUEST_TIMEOUT)
                .build(),
        }
    }

    /// Publishes our move for the given (already advanced) turn number.
    /// Failures are logged, not propagated: the local game goes on either
    /// way.
    pub fn post_move(&self, mv: CoordPair, turn: u16) {
        let payload = BrokerMove::new(mv, turn);
        match self.agent.post(&self.url).send_json(payload) {
            Ok(response) => match response.into_json::<Reply>() {
                Ok(reply) if reply.success && reply.data == Some(payload) => {},
                Ok(reply) => warn!(
                    "broker did not accept the move {mv}: success={}, data={:?}",
                    reply.success, reply.data
                ),
                Err(error) => warn!("broker sent an unreadable reply: {error}"),
            },
            Err(error) => warn!("failed to post the move to the broker: {error}"),
        }
    }

    /// Polls for the opponent's move. Returns `None` until a move for
    /// exactly `expected_turn` is available; the caller decides the retry
    /// cadence.
    #[must_use]
    pub fn get_move(&self, expected_turn: u16) -> Option<CoordPair> {
        let response = match self
            .agent
            .get(&self.url)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(error) => {
                warn!("failed to poll the broker: {error}");
                return None;
            },
        };
        let reply: Reply = match response.into_json() {
            Ok(reply) => reply,
            Err(error) => {
                warn!("broker sent an unreadable reply: {error}");
                return None;
            },
        };
        if !reply.success {
            warn!("broker reported a failure");
            return None;
        }
        // Data for another turn belongs to a move we have already seen (or
        // one the opponent has not made yet).
        let data = reply.data?;
        if data.turn != expected_turn {
            return None;
        }
        Some(data.as_move())
    }
}

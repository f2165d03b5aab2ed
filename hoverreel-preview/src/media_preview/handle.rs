use crate::scheduling::LivenessToken;

/// Proof of one playback attempt.
///
/// Handed to the media element when playback is requested and handed back
/// with the result. A ticket from an earlier attempt, from another preview,
/// or from a preview that has since been torn down, is ignored.
#[derive(Debug, Clone)]
pub struct PlayTicket {
    generation: u64,
    token: LivenessToken,
}

impl PlayTicket {
    pub(crate) fn new(generation: u64, token: LivenessToken) -> Self {
        Self { generation, token }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issued by `owner`, for attempt `generation`, and still alive.
    pub(crate) fn is_current(
        &self,
        generation: u64,
        owner: &LivenessToken,
    ) -> bool {
        self.generation == generation
            && self.token.same_owner(owner)
            && self.token.is_alive()
    }
}

/// The platform's trailer element for one preview.
///
/// `begin_play` starts an asynchronous play attempt; the platform reports
/// the outcome later through the session controller together with the
/// ticket. The other operations take effect synchronously.
pub trait MediaHandle {
    fn begin_play(&mut self, ticket: PlayTicket, muted: bool);
    fn pause(&mut self);
    fn rewind(&mut self);
    fn set_muted(&mut self, muted: bool);
}

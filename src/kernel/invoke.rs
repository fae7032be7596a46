/// Output of the most recent one-shot action (save/compile/generate/debug),
/// or the user-visible message of its failure. Overwritten by the next
/// action outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub output: String,
}

/// Bookkeeping for one-shot action requests. Each invocation takes a fresh
/// id from `latest_request`; only the reply matching the most recent id is
/// accepted, so a slow earlier compile can never overwrite a faster later
/// one.
#[derive(Debug, Default)]
pub struct InvokeState {
    pub result: Option<ActionResult>,
    latest_request: u64,
}

impl InvokeState {
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub(crate) fn next_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }

    pub(crate) fn is_latest(&self, request_id: u64) -> bool {
        request_id == self.latest_request && request_id != 0
    }

    pub(crate) fn set_output(&mut self, output: impl Into<String>) -> bool {
        let next = ActionResult {
            output: output.into(),
        };
        if self.result.as_ref() == Some(&next) {
            return false;
        }
        self.result = Some(next);
        true
    }
}

use crate::state::record::{ConsentPreferences, ConsentState};

/// The tagged action set accepted by the reducer.
///
/// Every action is total: no variant can fail, and the exhaustive enum means
/// there is no "unknown action" branch to handle at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsentAction {
    /// Grant every configured category. Records the decision as coming from
    /// the banner and closes the preferences modal.
    AcceptAll,
    /// Deny every configured category except `necessary`. Still a decision:
    /// `consented` becomes `true`.
    RejectAll,
    /// Toggle a single category. A no-op (with a compliance warning) when
    /// `id` is `necessary`.
    SetCategory { id: String, value: bool },
    /// Adopt a full preference map (reconciled against config, `necessary`
    /// forced). Records the decision as coming from the modal and closes it.
    SetPreferences(ConsentPreferences),
    OpenModal,
    /// Close the modal, re-stamping current preferences as a modal decision
    /// without changing any values.
    CloseModal,
    /// Forget the decision: back to the undecided skeleton. The engine clears
    /// the persisted cell as an external effect.
    Reset,
    /// Adopt a previously persisted state. Preferences are reconciled and the
    /// modal flag is forced closed.
    Hydrate(ConsentState),
}

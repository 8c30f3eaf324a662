use thiserror::Error;

use super::form::FormKind;

/// Why a controller operation was refused
///
/// Every variant leaves the controller in the state it was in before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("no form factory registered for {0}")]
    FactoryMissing(FormKind),

    #[error("no settings configured for form {0}")]
    SettingsMissing(FormKind),

    #[error("form {0} is locked")]
    FormLocked(FormKind),

    #[error("skin {skin} of form {form} is locked")]
    SkinLocked { form: FormKind, skin: usize },

    #[error("player is dead")]
    Dead,
}

impl ControllerError {
    /// Configuration errors point at broken setup rather than gameplay
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::FactoryMissing(_) | Self::SettingsMissing(_))
    }
}

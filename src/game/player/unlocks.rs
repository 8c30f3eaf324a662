// Form and skin unlock bookkeeping
//
// Persistence is someone else's job; the controller only asks the store.

use std::collections::HashSet;

use super::form::FormKind;

pub trait UnlockStore {
    fn is_form_unlocked(&self, form: FormKind) -> bool;

    fn is_skin_unlocked(&self, form: FormKind, skin: usize) -> bool;

    fn unlock_form(&mut self, form: FormKind);

    fn unlock_skin(&mut self, form: FormKind, skin: usize);

    /// Unlocked forms in catalogue order
    fn unlocked_forms(&self) -> Vec<FormKind> {
        FormKind::ALL
            .into_iter()
            .filter(|form| self.is_form_unlocked(*form))
            .collect()
    }
}

/// In-memory unlocks. The base form and every form's first skin are always
/// unlocked.
#[derive(Debug, Clone, Default)]
pub struct FormUnlocks {
    forms: HashSet<FormKind>,
    skins: HashSet<(FormKind, usize)>,
}

impl FormUnlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every form unlocked (skins still follow the normal rules)
    pub fn all_forms() -> Self {
        Self {
            forms: FormKind::ALL.into_iter().collect(),
            skins: HashSet::new(),
        }
    }

    pub fn with_form(mut self, form: FormKind) -> Self {
        self.unlock_form(form);
        self
    }
}

impl UnlockStore for FormUnlocks {
    fn is_form_unlocked(&self, form: FormKind) -> bool {
        form == FormKind::BASE || self.forms.contains(&form)
    }

    fn is_skin_unlocked(&self, form: FormKind, skin: usize) -> bool {
        skin == 0 || self.skins.contains(&(form, skin))
    }

    fn unlock_form(&mut self, form: FormKind) {
        self.forms.insert(form);
    }

    fn unlock_skin(&mut self, form: FormKind, skin: usize) {
        self.skins.insert((form, skin));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_form_always_unlocked() {
        let unlocks = FormUnlocks::new();
        assert!(unlocks.is_form_unlocked(FormKind::NormalHead));
        assert!(!unlocks.is_form_unlocked(FormKind::Fish));
        assert_eq!(unlocks.unlocked_forms(), vec![FormKind::NormalHead]);
    }

    #[test]
    fn test_unlocked_forms_follow_catalogue_order() {
        let unlocks = FormUnlocks::new()
            .with_form(FormKind::Vanguard)
            .with_form(FormKind::Fish);
        assert_eq!(
            unlocks.unlocked_forms(),
            vec![FormKind::NormalHead, FormKind::Fish, FormKind::Vanguard]
        );
    }

    #[test]
    fn test_first_skin_always_unlocked() {
        let mut unlocks = FormUnlocks::new();
        assert!(unlocks.is_skin_unlocked(FormKind::Cry, 0));
        assert!(!unlocks.is_skin_unlocked(FormKind::Cry, 1));

        unlocks.unlock_skin(FormKind::Cry, 1);
        assert!(unlocks.is_skin_unlocked(FormKind::Cry, 1));
    }
}

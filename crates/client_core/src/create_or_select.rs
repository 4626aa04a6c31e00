//! A relation field satisfied either by picking an existing resource or
//! by inline-creating a new one before the parent request fires.

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    #[default]
    UseExisting,
    CreateNew,
}

/// Holds both sub-forms at once; switching the mode never clears the
/// values of the inactive one. Only the active mode's fields are validated
/// and submitted.
#[derive(Debug, Clone)]
pub struct CreateOrSelect<I, D> {
    mode: FieldMode,
    pub selected: Option<I>,
    pub draft: D,
}

impl<I: Copy, D> CreateOrSelect<I, D> {
    pub fn selecting(selected: Option<I>, draft: D) -> Self {
        Self {
            mode: FieldMode::UseExisting,
            selected,
            draft,
        }
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn use_existing(&self) -> bool {
        self.mode == FieldMode::UseExisting
    }

    pub fn switch(&mut self) {
        self.mode = match self.mode {
            FieldMode::UseExisting => FieldMode::CreateNew,
            FieldMode::CreateNew => FieldMode::UseExisting,
        };
    }

    /// The selected id, required while the field is in select mode.
    pub fn selected_id(&self, what: &str) -> Result<I, ClientError> {
        self.selected
            .ok_or_else(|| ClientError::validation(format!("select a {what}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, PartialEq, Debug, Clone)]
    struct Draft {
        name: String,
    }

    #[test]
    fn defaults_to_selecting_an_existing_resource() {
        let field: CreateOrSelect<i64, Draft> = CreateOrSelect::selecting(None, Draft::default());
        assert!(field.use_existing());
    }

    #[test]
    fn switching_modes_preserves_both_subforms() {
        let mut field = CreateOrSelect::selecting(
            Some(4_i64),
            Draft {
                name: "Fresh Foods".into(),
            },
        );
        field.switch();
        field.switch();
        assert!(field.use_existing());
        assert_eq!(field.selected, Some(4));
        assert_eq!(field.draft.name, "Fresh Foods");
    }

    #[test]
    fn select_mode_requires_a_selection() {
        let field: CreateOrSelect<i64, Draft> = CreateOrSelect::selecting(None, Draft::default());
        let err = field.selected_id("company").expect_err("must fail");
        assert!(matches!(err, ClientError::Validation(_)));
    }
}

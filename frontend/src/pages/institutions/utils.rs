use crate::api::{
    decode_active_modules, encode_active_modules, ActiveModules, CreateOrganizationRequest,
    Organization, UpdateOrganizationRequest,
};
use leptos::*;

/// Fields of the add/edit institution dialog. The dialog shows a single
/// error line, not per-field errors.
#[derive(Clone, Copy)]
pub struct InstitutionFormState {
    name: RwSignal<String>,
    description: RwSignal<String>,
    address: RwSignal<String>,
    map_url: RwSignal<String>,
    smoke_detection: RwSignal<bool>,
    fire_detection: RwSignal<bool>,
    access_control: RwSignal<bool>,
    perimeter_monitoring: RwSignal<bool>,
    form_error: RwSignal<Option<String>>,
}

impl Default for InstitutionFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            address: create_rw_signal(String::new()),
            map_url: create_rw_signal(String::new()),
            smoke_detection: create_rw_signal(false),
            fire_detection: create_rw_signal(false),
            access_control: create_rw_signal(false),
            perimeter_monitoring: create_rw_signal(false),
            form_error: create_rw_signal(None),
        }
    }
}

impl InstitutionFormState {
    pub fn name_signal(&self) -> RwSignal<String> {
        self.name
    }

    pub fn description_signal(&self) -> RwSignal<String> {
        self.description
    }

    pub fn address_signal(&self) -> RwSignal<String> {
        self.address
    }

    pub fn map_url_signal(&self) -> RwSignal<String> {
        self.map_url
    }

    pub fn smoke_detection_signal(&self) -> RwSignal<bool> {
        self.smoke_detection
    }

    pub fn fire_detection_signal(&self) -> RwSignal<bool> {
        self.fire_detection
    }

    pub fn access_control_signal(&self) -> RwSignal<bool> {
        self.access_control
    }

    pub fn perimeter_monitoring_signal(&self) -> RwSignal<bool> {
        self.perimeter_monitoring
    }

    pub fn form_error(&self) -> RwSignal<Option<String>> {
        self.form_error
    }

    /// Name and address are the required fields.
    pub fn validate(&self) -> bool {
        if self.name.get_untracked().is_empty() || self.address.get_untracked().is_empty() {
            self.form_error
                .set(Some("Пожалуйста, заполните обязательные поля".to_string()));
            return false;
        }
        self.form_error.set(None);
        true
    }

    pub fn modules(&self) -> ActiveModules {
        ActiveModules {
            smoke_detection: self.smoke_detection.get_untracked(),
            fire_detection: self.fire_detection.get_untracked(),
            access_control: self.access_control.get_untracked(),
            perimeter_monitoring: self.perimeter_monitoring.get_untracked(),
        }
    }

    pub fn to_create_request(&self) -> CreateOrganizationRequest {
        CreateOrganizationRequest {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            address: self.address.get_untracked(),
            map_url: self.map_url.get_untracked(),
            active_modules: encode_active_modules(&self.modules()),
        }
    }

    /// Everything the dialog edits. `is_active` stays untouched, the dialog
    /// has no control for it.
    pub fn to_changes(&self) -> InstitutionChanges {
        InstitutionChanges {
            name: Some(self.name.get_untracked()),
            description: Some(self.description.get_untracked()),
            address: Some(self.address.get_untracked()),
            is_active: None,
            map_url: Some(self.map_url.get_untracked()),
            active_modules: Some(self.modules()),
        }
    }

    pub fn load_from(&self, organization: &Organization) {
        let modules = decode_active_modules(&organization.active_modules);
        self.name.set(organization.name.clone());
        self.description.set(organization.description.clone());
        self.address.set(organization.address.clone());
        self.map_url.set(organization.map_url.clone());
        self.smoke_detection.set(modules.smoke_detection);
        self.fire_detection.set(modules.fire_detection);
        self.access_control.set(modules.access_control);
        self.perimeter_monitoring.set(modules.perimeter_monitoring);
        self.form_error.set(None);
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.address.set(String::new());
        self.map_url.set(String::new());
        self.smoke_detection.set(false);
        self.fire_detection.set(false);
        self.access_control.set(false);
        self.perimeter_monitoring.set(false);
        self.form_error.set(None);
    }
}

/// Fields an update wants to change. `None` means "keep what the record has".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
    pub map_url: Option<String>,
    pub active_modules: Option<ActiveModules>,
}

/// Builds the full-record payload the update endpoint expects, filling every
/// gap in `changes` from the currently loaded record.
pub fn merge_changes(
    current: &Organization,
    changes: &InstitutionChanges,
) -> UpdateOrganizationRequest {
    UpdateOrganizationRequest {
        organization_id: current.organization_id.clone(),
        name: changes.name.clone().unwrap_or_else(|| current.name.clone()),
        description: changes
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone()),
        address: changes
            .address
            .clone()
            .unwrap_or_else(|| current.address.clone()),
        is_active: changes.is_active.unwrap_or(current.is_active),
        map_url: changes
            .map_url
            .clone()
            .unwrap_or_else(|| current.map_url.clone()),
        active_modules: changes
            .active_modules
            .map(|modules| encode_active_modules(&modules))
            .unwrap_or_else(|| current.active_modules.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{helpers::sample_organization, with_runtime};

    #[test]
    fn missing_required_fields_set_the_shared_error() {
        with_runtime(|| {
            let form = InstitutionFormState::default();
            form.name_signal().set("Только имя".into());
            assert!(!form.validate());
            assert_eq!(
                form.form_error().get_untracked().as_deref(),
                Some("Пожалуйста, заполните обязательные поля")
            );

            form.address_signal().set("ул. Абая, 1".into());
            assert!(form.validate());
            assert!(form.form_error().get_untracked().is_none());
        });
    }

    #[test]
    fn create_request_serializes_the_module_toggles() {
        with_runtime(|| {
            let form = InstitutionFormState::default();
            form.name_signal().set("Склад В".into());
            form.address_signal().set("ул. Толе би, 5".into());
            form.smoke_detection_signal().set(true);
            form.perimeter_monitoring_signal().set(true);

            let request = form.to_create_request();
            let modules = decode_active_modules(&request.active_modules);
            assert!(modules.smoke_detection);
            assert!(modules.perimeter_monitoring);
            assert!(!modules.fire_detection);
            assert!(!modules.access_control);
        });
    }

    #[test]
    fn load_from_fills_fields_and_flags() {
        with_runtime(|| {
            let mut organization = sample_organization("7", "Офис");
            organization.active_modules = "{\"smokDetection\":true,\"fireDetection\":true}".into();

            let form = InstitutionFormState::default();
            form.load_from(&organization);
            assert_eq!(form.name_signal().get_untracked(), "Офис");
            assert!(form.smoke_detection_signal().get_untracked());
            assert!(form.fire_detection_signal().get_untracked());
            assert!(!form.access_control_signal().get_untracked());

            let changes = form.to_changes();
            assert_eq!(changes.is_active, None);
            assert_eq!(changes.name.as_deref(), Some("Офис"));
        });
    }

    #[test]
    fn merge_keeps_unnamed_fields_from_the_record() {
        let mut current = sample_organization("42", "Главный офис");
        current.active_modules = "{\"smokDetection\":true}".to_string();
        current.map_url = "https://maps.example.kz/42".to_string();
        let changes = InstitutionChanges {
            name: Some("Переименованный офис".to_string()),
            ..InstitutionChanges::default()
        };

        let request = merge_changes(&current, &changes);
        assert_eq!(request.organization_id, "42");
        assert_eq!(request.name, "Переименованный офис");
        assert_eq!(request.description, current.description);
        assert_eq!(request.address, current.address);
        assert_eq!(request.is_active, current.is_active);
        assert_eq!(request.map_url, current.map_url);
        assert_eq!(request.active_modules, current.active_modules);
    }

    #[test]
    fn merge_with_no_changes_reproduces_the_record() {
        let current = sample_organization("9", "Склад");
        let request = merge_changes(&current, &InstitutionChanges::default());
        assert_eq!(request.name, current.name);
        assert_eq!(request.is_active, current.is_active);
        assert_eq!(request.active_modules, current.active_modules);
    }
}

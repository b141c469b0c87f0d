use super::repository::InstitutionsRepository;
use super::utils::{merge_changes, InstitutionChanges, InstitutionFormState};
use crate::api::{ApiClient, ApiError, CreateOrganizationRequest, ErrorEnvelope, Organization};
use crate::config;
use leptos::*;

/// How long the details panel keeps its record after closing, so the slide
/// animation finishes before the content disappears.
pub const DETAILS_CLEAR_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, Default)]
pub struct InstitutionsState {
    pub institutions: Vec<Organization>,
    pub selected: Option<Organization>,
    pub details_visible: bool,
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Replaces the list with whatever the repository returns. A failed refresh
/// keeps the list that was already on screen.
pub async fn load_institutions(
    repository: &InstitutionsRepository,
    set_state: WriteSignal<InstitutionsState>,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.list().await {
        Ok(institutions) => {
            set_state.update(|state| {
                state.institutions = institutions;
                state.loading = false;
            });
            true
        }
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub async fn create_institution(
    repository: &InstitutionsRepository,
    set_state: WriteSignal<InstitutionsState>,
    request: &CreateOrganizationRequest,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.create(request).await {
        Ok(_) => load_institutions(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

/// Looks the record up in the loaded list, fills the gaps in `changes` from
/// it and submits the full record, then reloads the list so the screen shows
/// the server's truth. An id that is not in the list never reaches the wire.
pub async fn update_institution(
    repository: &InstitutionsRepository,
    state: ReadSignal<InstitutionsState>,
    set_state: WriteSignal<InstitutionsState>,
    organization_id: &str,
    changes: &InstitutionChanges,
) -> bool {
    let current = match state
        .get_untracked()
        .institutions
        .iter()
        .find(|org| org.organization_id == organization_id)
    {
        Some(current) => current.clone(),
        None => {
            set_state.update(|state| {
                state.error = Some(ApiError::validation("Учреждение не найдено"));
            });
            return false;
        }
    };
    let request = merge_changes(&current, changes);
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.update(&request).await {
        Ok(_) => load_institutions(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub async fn delete_institution(
    repository: &InstitutionsRepository,
    set_state: WriteSignal<InstitutionsState>,
    organization_id: &str,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.delete(organization_id).await {
        Ok(response) if response.success => {
            let reloaded = load_institutions(repository, set_state).await;
            set_state.update(|state| {
                let deleted_selected = state
                    .selected
                    .as_ref()
                    .is_some_and(|selected| selected.organization_id == organization_id);
                if deleted_selected {
                    state.selected = None;
                    state.details_visible = false;
                }
            });
            reloaded
        }
        Ok(response) => {
            set_state.update(|state| {
                state.error = Some(ApiError::application(
                    200,
                    ErrorEnvelope {
                        error: "Delete failed".to_string(),
                        message: response.message,
                    },
                ));
                state.loading = false;
            });
            false
        }
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub fn select_institution(set_state: WriteSignal<InstitutionsState>, organization: Organization) {
    set_state.update(|state| {
        state.selected = Some(organization);
        state.details_visible = true;
    });
}

/// Hides the panel right away; the record itself is dropped once the close
/// animation has had time to finish.
pub fn close_details(set_state: WriteSignal<InstitutionsState>) {
    set_state.update(|state| state.details_visible = false);
    #[cfg(target_arch = "wasm32")]
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(DETAILS_CLEAR_DELAY_MS).await;
        let _ = set_state.try_update(|state| state.selected = None);
    });
    #[cfg(not(target_arch = "wasm32"))]
    set_state.update(|state| state.selected = None);
}

#[derive(Clone, Copy)]
pub struct InstitutionsViewModel {
    pub state: ReadSignal<InstitutionsState>,
    pub set_state: WriteSignal<InstitutionsState>,
    pub form: InstitutionFormState,
    pub add_dialog_visible: RwSignal<bool>,
    pub edit_dialog_visible: RwSignal<bool>,
    pub load_action: Action<(), bool>,
    pub create_action: Action<CreateOrganizationRequest, bool>,
    pub update_action: Action<(String, InstitutionChanges), bool>,
    pub delete_action: Action<String, bool>,
}

impl InstitutionsViewModel {
    pub fn open_add_dialog(&self) {
        self.form.reset();
        self.add_dialog_visible.set(true);
    }

    pub fn open_edit_dialog(&self) {
        if let Some(current) = self.state.get_untracked().selected {
            self.form.load_from(&current);
            self.edit_dialog_visible.set(true);
        }
    }

    pub fn submit_new(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        if !self.form.validate() {
            return;
        }
        self.create_action.dispatch(self.form.to_create_request());
    }

    /// Submits the edit dialog against the selected record.
    pub fn submit_changes(&self) {
        if self.update_action.pending().get_untracked() {
            return;
        }
        if !self.form.validate() {
            return;
        }
        if let Some(current) = self.state.get_untracked().selected {
            self.update_action
                .dispatch((current.organization_id, self.form.to_changes()));
        }
    }

    pub fn remove(&self, organization_id: String) {
        if self.delete_action.pending().get_untracked() {
            return;
        }
        self.delete_action.dispatch(organization_id);
    }

    pub fn select(&self, organization: Organization) {
        select_institution(self.set_state, organization);
    }

    pub fn close_details(&self) {
        close_details(self.set_state);
    }
}

pub fn use_institutions_view_model() -> InstitutionsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(InstitutionsRepository::from_data_source(
        config::data_source(),
        api,
    ));

    let (state, set_state) = create_signal(InstitutionsState::default());
    let form = InstitutionFormState::default();
    let add_dialog_visible = create_rw_signal(false);
    let edit_dialog_visible = create_rw_signal(false);

    let load_action = create_action(move |_: &()| {
        let repository = repository.get_value();
        async move { load_institutions(&repository, set_state).await }
    });
    let create_action = create_action(move |request: &CreateOrganizationRequest| {
        let repository = repository.get_value();
        let request = request.clone();
        async move { create_institution(&repository, set_state, &request).await }
    });
    let update_action = leptos::create_action(move |payload: &(String, InstitutionChanges)| {
        let repository = repository.get_value();
        let (organization_id, changes) = payload.clone();
        async move {
            update_institution(&repository, state, set_state, &organization_id, &changes).await
        }
    });
    let delete_action = leptos::create_action(move |organization_id: &String| {
        let repository = repository.get_value();
        let organization_id = organization_id.clone();
        async move { delete_institution(&repository, set_state, &organization_id).await }
    });

    create_effect(move |_| {
        apply_create_result(create_action.value().get(), form, add_dialog_visible);
    });
    create_effect(move |_| {
        apply_update_result(update_action.value().get(), edit_dialog_visible);
    });

    // The first load happens in the browser.
    #[cfg(target_arch = "wasm32")]
    load_action.dispatch(());

    InstitutionsViewModel {
        state,
        set_state,
        form,
        add_dialog_visible,
        edit_dialog_visible,
        load_action,
        create_action,
        update_action,
        delete_action,
    }
}

fn apply_create_result(
    result: Option<bool>,
    form: InstitutionFormState,
    add_dialog_visible: RwSignal<bool>,
) {
    if result == Some(true) {
        form.reset();
        add_dialog_visible.set(false);
    }
}

fn apply_update_result(result: Option<bool>, edit_dialog_visible: RwSignal<bool>) {
    if result == Some(true) {
        edit_dialog_visible.set(false);
    }
}

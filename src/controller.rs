use crate::client::HealthApi;
use crate::dates;
use crate::errors::AppError;
use crate::grid::{YearGrid, build_year_grid};
use crate::models::{
    AuthResponse, DEFAULT_SEVERITY, Entry, LoginRequest, MAX_SEVERITY, MIN_PASSWORD_LEN,
    MIN_SEVERITY, SessionResponse, SignupRequest, User,
};
use crate::normalize::normalize_entries;
use crate::reconcile::{KnownYears, SavePlan, YearCollection, apply_save, prepare_save, send_save};
use crate::session::Session;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    pub date: NaiveDate,
    pub date_key: String,
    pub is_sick: bool,
    pub severity: u8,
}

impl EntryForm {
    /// Prefilled from the day's entry, or healthy at severity 1.
    fn for_day(date: NaiveDate, existing: Option<&Entry>) -> Self {
        let (is_sick, severity) = match existing {
            Some(entry) => (entry.is_sick, entry.severity.unwrap_or(DEFAULT_SEVERITY)),
            None => (false, DEFAULT_SEVERITY),
        };
        Self {
            date,
            date_key: dates::date_key(date),
            is_sick,
            severity,
        }
    }
}

/// `Idle -> Editing -> (Confirming ->) Saving -> Idle`. Cancelling a
/// confirmation goes back to `Editing`; a failed save does too.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EditFlow {
    Idle,
    Editing { form: EntryForm },
    Confirming { form: EntryForm, plan: SavePlan },
    Saving { form: EntryForm },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub authenticated: bool,
    pub user: Option<User>,
    pub years: Vec<i32>,
    pub selected_year: i32,
    pub entries: Vec<Entry>,
    pub grid: Option<YearGrid>,
    pub edit: EditFlow,
    pub busy: bool,
    pub error: Option<String>,
}

struct ControllerState {
    session: Session,
    known_years: KnownYears,
    collection: YearCollection,
    flow: EditFlow,
    error: Option<String>,
    // Bumped per year fetch, per save, and per sign-in or sign-out. A network
    // reply is applied only if its number is still current.
    fetch_seq: u64,
    save_seq: u64,
    account_seq: u64,
}

pub struct Controller<A> {
    api: A,
    state: Mutex<ControllerState>,
}

impl<A: HealthApi> Controller<A> {
    pub fn new(api: A, session: Session, year: i32) -> Self {
        Self {
            api,
            state: Mutex::new(ControllerState {
                session,
                known_years: KnownYears::default(),
                collection: YearCollection::empty(year),
                flow: EditFlow::Idle,
                error: None,
                fetch_seq: 0,
                save_seq: 0,
                account_seq: 0,
            }),
        }
    }

    /// Loads the stored session and checks it with the auth service. A
    /// session the service rejects is cleared without surfacing an error.
    pub async fn restore(&self) {
        let token = {
            let mut state = self.state.lock().await;
            state.session.load().await.map(|stored| stored.token.clone())
        };
        let Some(token) = token else {
            return;
        };

        match self.api.get_me(&token).await {
            Ok(user) => {
                {
                    let mut state = self.state.lock().await;
                    if let Err(err) = state.session.persist(token, user).await {
                        warn!("failed to refresh stored session: {err}");
                    }
                }
                self.load_account().await;
            }
            Err(err) => {
                info!("stored session rejected, signing out: {err}");
                self.state.lock().await.session.clear().await;
            }
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<(), AppError> {
        validate_signup(&request)?;
        let auth = self.api.signup(&request).await?;
        self.start_session(auth).await;
        Ok(())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<(), AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::bad_request("email and password are required"));
        }
        let auth = self.api.login(&request).await?;
        self.start_session(auth).await;
        Ok(())
    }

    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.session.clear().await;
        let year = state.collection.year();
        state.collection = YearCollection::empty(year);
        state.known_years = KnownYears::default();
        state.flow = EditFlow::Idle;
        state.error = None;
        state.fetch_seq += 1;
        state.account_seq += 1;
        info!("signed out");
    }

    pub async fn select_year(&self, year: i32) -> Result<(), AppError> {
        if dates::days_in_year(year).is_none() {
            return Err(AppError::bad_request("year is out of range"));
        }
        ensure_signed_in(&*self.state.lock().await)?;
        self.load_year(year).await;
        Ok(())
    }

    pub async fn select_day(&self, date: &str) -> Result<(), AppError> {
        let date = dates::parse_date_key(date)
            .ok_or_else(|| AppError::bad_request("date must be a valid YYYY-MM-DD day"))?;

        let mut state = self.state.lock().await;
        ensure_signed_in(&state)?;
        if date.year() != state.collection.year() {
            return Err(AppError::bad_request("date is outside the selected year"));
        }
        if matches!(state.flow, EditFlow::Saving { .. }) {
            return Err(AppError::conflict("a save is in progress"));
        }

        let form = EntryForm::for_day(date, state.collection.find(&dates::date_key(date)));
        state.flow = EditFlow::Editing { form };
        state.error = None;
        Ok(())
    }

    /// Submits the open form. New days are saved at once; days that already
    /// have an entry wait in `Confirming`.
    pub async fn submit(&self, is_sick: bool, severity: Option<u8>) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        ensure_signed_in(&state)?;

        let EditFlow::Editing { form } = &state.flow else {
            return Err(AppError::conflict("no day is being edited"));
        };
        let severity = severity.unwrap_or(DEFAULT_SEVERITY);
        if is_sick && !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(AppError::bad_request(format!(
                "severity must be between {MIN_SEVERITY} and {MAX_SEVERITY}"
            )));
        }

        let form = EntryForm {
            is_sick,
            severity,
            ..form.clone()
        };
        let plan = prepare_save(form.date, is_sick, severity, &state.collection);
        if plan.needs_confirmation {
            debug!(date_key = %plan.date_key, "update needs confirmation");
            state.flow = EditFlow::Confirming { form, plan };
            return Ok(());
        }

        self.commit(state, form, plan).await;
        Ok(())
    }

    pub async fn confirm(&self) -> Result<(), AppError> {
        let state = self.state.lock().await;
        ensure_signed_in(&state)?;

        let (form, plan) = match &state.flow {
            EditFlow::Confirming { form, plan } => (form.clone(), plan.clone()),
            _ => return Err(AppError::conflict("nothing is waiting for confirmation")),
        };
        self.commit(state, form, plan).await;
        Ok(())
    }

    pub async fn cancel(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let next = match &state.flow {
            EditFlow::Confirming { form, .. } => EditFlow::Editing { form: form.clone() },
            EditFlow::Editing { .. } | EditFlow::Idle => EditFlow::Idle,
            EditFlow::Saving { .. } => return Err(AppError::conflict("a save is in progress")),
        };
        state.flow = next;
        Ok(())
    }

    pub async fn session(&self) -> SessionResponse {
        let state = self.state.lock().await;
        SessionResponse {
            authenticated: state.session.token().is_some(),
            user: state.session.user().cloned(),
        }
    }

    pub async fn view(&self) -> Result<View, AppError> {
        let state = self.state.lock().await;
        let year = state.collection.year();
        let authenticated = state.session.token().is_some();

        let grid = if authenticated {
            Some(build_year_grid(year, state.collection.entries()).map_err(AppError::internal)?)
        } else {
            None
        };

        let mut years = state.known_years.clone();
        years.insert(year);

        Ok(View {
            authenticated,
            user: state.session.user().cloned(),
            years: years.to_vec(),
            selected_year: year,
            entries: state.collection.entries().to_vec(),
            grid,
            edit: state.flow.clone(),
            busy: matches!(state.flow, EditFlow::Saving { .. }),
            error: state.error.clone(),
        })
    }

    async fn start_session(&self, auth: AuthResponse) {
        {
            let mut state = self.state.lock().await;
            info!(user = auth.user.email().unwrap_or("unknown"), "signed in");
            if let Err(err) = state.session.persist(auth.token, auth.user).await {
                warn!("session will not survive a restart: {err}");
            }
            state.flow = EditFlow::Idle;
            state.error = None;
            state.account_seq += 1;
        }
        self.load_account().await;
    }

    async fn load_account(&self) {
        let year = self.state.lock().await.collection.year();
        self.load_year(year).await;
        self.refresh_years().await;
    }

    async fn refresh_years(&self) {
        let (seq, token) = {
            let state = self.state.lock().await;
            let Some(token) = state.session.token().map(str::to_owned) else {
                return;
            };
            (state.account_seq, token)
        };

        let result = self.api.fetch_years(&token).await;

        let mut state = self.state.lock().await;
        if state.account_seq != seq {
            debug!("discarding years of a previous session");
            return;
        }
        match result {
            Ok(years) => state.known_years = years.into_iter().collect(),
            Err(err) => {
                warn!("failed to load years: {err}");
                if state.error.is_none() {
                    state.error = Some(err.user_message());
                }
            }
        }
    }

    async fn load_year(&self, year: i32) {
        let (seq, token) = {
            let mut state = self.state.lock().await;
            let Some(token) = state.session.token().map(str::to_owned) else {
                return;
            };
            state.fetch_seq += 1;
            state.collection = YearCollection::empty(year);
            state.flow = EditFlow::Idle;
            state.error = None;
            (state.fetch_seq, token)
        };

        info!(year, "loading entries");
        let result = self.api.fetch_entries_by_year(year, &token).await;

        let mut state = self.state.lock().await;
        if state.fetch_seq != seq {
            debug!(year, "discarding stale entries response");
            return;
        }
        match result {
            Ok(raws) => {
                let entries = normalize_entries(&raws);
                info!(year, count = entries.len(), "loaded entries");
                state.collection = YearCollection::from_entries(year, entries);
            }
            Err(err) => {
                warn!(year, "failed to load entries: {err}");
                state.error = Some(err.user_message());
            }
        }
    }

    async fn commit(
        &self,
        mut state: MutexGuard<'_, ControllerState>,
        form: EntryForm,
        plan: SavePlan,
    ) {
        let Some(token) = state.session.token().map(str::to_owned) else {
            return;
        };
        state.save_seq += 1;
        let seq = state.save_seq;
        state.flow = EditFlow::Saving { form: form.clone() };
        drop(state);

        let saved = send_save(&self.api, &token, &plan).await;

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        if state.save_seq != seq || !matches!(state.flow, EditFlow::Saving { .. }) {
            debug!(date_key = %form.date_key, "discarding reply for an abandoned save");
            return;
        }
        let merged = saved.and_then(|entry| {
            apply_save(entry.clone(), &mut state.collection, &mut state.known_years)?;
            Ok(entry)
        });

        match merged {
            Ok(entry) => {
                info!(date_key = %entry.date_key, sick = entry.is_sick, "saved entry");
                state.flow = EditFlow::Idle;
                state.error = None;
            }
            Err(err) => {
                warn!(date_key = %form.date_key, "failed to save entry: {err}");
                state.error = Some(err.user_message());
                state.flow = EditFlow::Editing { form };
            }
        }
    }
}

fn ensure_signed_in(state: &ControllerState) -> Result<(), AppError> {
    match state.session.token() {
        Some(_) => Ok(()),
        None => Err(AppError::unauthorized("sign in first")),
    }
}

fn validate_signup(request: &SignupRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::bad_request("name and email are required"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::tests::{FakeApi, Gate};
    use crate::session::{SessionStore, StoreKind};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn session_in(dir: &Path) -> Session {
        Session::new(vec![
            SessionStore::in_dir(StoreKind::KeyValue, dir),
            SessionStore::in_dir(StoreKind::Cookie, dir),
        ])
    }

    fn seeded_api() -> FakeApi {
        FakeApi::with_entries(
            2024,
            vec![
                json!({ "_id": "a", "dateKey": "2024-03-05", "date": "2024-03-05T00:00:00.000Z", "isSick": true, "severity": 3 }),
                json!({ "_id": "b", "dateKey": "2024-03-07", "date": "2024-03-07T00:00:00.000Z", "isSick": false, "severity": null }),
                json!({ "isSick": "maybe" }),
            ],
        )
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".into(),
            password: "correct-horse".into(),
        }
    }

    async fn signed_in(api: FakeApi, dir: &Path) -> Controller<FakeApi> {
        let controller = Controller::new(api, session_in(dir), 2024);
        controller.login(login_request()).await.unwrap();
        controller
    }

    fn keys(view: &View) -> Vec<&str> {
        view.entries.iter().map(|e| e.date_key.as_str()).collect()
    }

    #[tokio::test]
    async fn new_day_is_saved_without_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let controller = signed_in(seeded_api(), dir.path()).await;

        let view = controller.view().await.unwrap();
        assert!(view.authenticated);
        assert_eq!(view.years, [2024]);
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);

        controller.select_day("2024-06-01").await.unwrap();
        let view = controller.view().await.unwrap();
        let EditFlow::Editing { form } = &view.edit else {
            panic!("expected editing, got {:?}", view.edit);
        };
        assert!(!form.is_sick);
        assert_eq!(form.severity, 1);

        controller.submit(false, Some(1)).await.unwrap();
        let view = controller.view().await.unwrap();
        assert_eq!(view.edit, EditFlow::Idle);
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07", "2024-06-01"]);
        assert_eq!(controller.api.saves.load(Ordering::SeqCst), 1);

        let grid = view.grid.unwrap();
        let slot = grid.slots().find(|slot| slot.date_key == "2024-06-01").unwrap();
        assert_eq!(slot.entry.as_ref().map(|e| e.is_sick), Some(false));
    }

    #[tokio::test]
    async fn existing_day_waits_for_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let controller = signed_in(seeded_api(), dir.path()).await;

        controller.select_day("2024-03-05").await.unwrap();
        let view = controller.view().await.unwrap();
        let EditFlow::Editing { form } = &view.edit else {
            panic!("expected editing");
        };
        assert!(form.is_sick);
        assert_eq!(form.severity, 3);

        controller.submit(false, None).await.unwrap();
        let view = controller.view().await.unwrap();
        let EditFlow::Confirming { plan, .. } = &view.edit else {
            panic!("expected confirming, got {:?}", view.edit);
        };
        assert_eq!(plan.existing.as_ref().and_then(|e| e.severity), Some(3));
        assert_eq!(plan.payload.severity, None);
        assert_eq!(controller.api.saves.load(Ordering::SeqCst), 0);

        controller.cancel().await.unwrap();
        let view = controller.view().await.unwrap();
        let EditFlow::Editing { form } = &view.edit else {
            panic!("cancel should return to editing");
        };
        assert!(!form.is_sick);
        assert_eq!(view.entries[0].severity, Some(3));

        controller.submit(false, None).await.unwrap();
        controller.confirm().await.unwrap();
        let view = controller.view().await.unwrap();
        assert_eq!(view.edit, EditFlow::Idle);
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);
        assert!(!view.entries[0].is_sick);
        assert_eq!(view.entries[0].severity, None);
    }

    #[tokio::test]
    async fn failed_save_keeps_collection_and_form() {
        let dir = tempfile::tempdir().unwrap();
        let controller = signed_in(seeded_api(), dir.path()).await;
        controller.api.fail_saves.store(true, Ordering::SeqCst);

        controller.select_day("2024-06-01").await.unwrap();
        controller.submit(true, Some(4)).await.unwrap();

        let view = controller.view().await.unwrap();
        assert_eq!(view.error.as_deref(), Some("save failed"));
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);
        let EditFlow::Editing { form } = &view.edit else {
            panic!("expected editing after failure");
        };
        assert!(form.is_sick);
        assert_eq!(form.severity, 4);
    }

    #[tokio::test]
    async fn failed_fetch_empties_the_year() {
        let dir = tempfile::tempdir().unwrap();
        let controller = signed_in(seeded_api(), dir.path()).await;
        controller.api.fail_fetches.store(true, Ordering::SeqCst);

        controller.select_year(2023).await.unwrap();
        let view = controller.view().await.unwrap();
        assert_eq!(view.selected_year, 2023);
        assert!(view.entries.is_empty());
        assert_eq!(view.error.as_deref(), Some("fetch failed"));
        assert_eq!(view.grid.unwrap().year, 2023);
        // Known years stay advisory; the selected year is always offered.
        assert_eq!(view.years, [2023, 2024]);
    }

    #[tokio::test]
    async fn stale_year_response_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let controller = Arc::new(signed_in(seeded_api(), dir.path()).await);
        controller
            .api
            .entries
            .lock()
            .unwrap()
            .insert(2023, vec![json!({ "dateKey": "2023-01-02", "isSick": false })]);

        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *controller.api.gate.lock().unwrap() = Some((2023, entered.clone(), release.clone()));

        let slow = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.select_year(2023).await })
        };
        entered.notified().await;
        controller.select_year(2024).await.unwrap();
        release.notify_one();
        slow.await.unwrap().unwrap();

        let view = controller.view().await.unwrap();
        assert_eq!(view.selected_year, 2024);
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);
    }

    fn install(gate: &Gate) -> (Arc<Notify>, Arc<Notify>) {
        let pair = (Arc::new(Notify::new()), Arc::new(Notify::new()));
        *gate.lock().unwrap() = Some(pair.clone());
        pair
    }

    #[tokio::test]
    async fn view_shows_busy_while_saving() {
        let dir = tempfile::tempdir().unwrap();
        let controller = Arc::new(signed_in(seeded_api(), dir.path()).await);
        let (entered, release) = install(&controller.api.save_gate);

        controller.select_day("2024-06-01").await.unwrap();
        let saving = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit(true, Some(2)).await })
        };
        entered.notified().await;

        let view = tokio::time::timeout(Duration::from_millis(500), controller.view())
            .await
            .expect("view waited for the save")
            .unwrap();
        assert!(view.busy);
        assert!(matches!(view.edit, EditFlow::Saving { .. }));
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);
        assert_eq!(
            controller.select_day("2024-06-02").await.unwrap_err().status,
            StatusCode::CONFLICT
        );
        assert_eq!(controller.cancel().await.unwrap_err().status, StatusCode::CONFLICT);

        release.notify_one();
        saving.await.unwrap().unwrap();

        let view = controller.view().await.unwrap();
        assert!(!view.busy);
        assert_eq!(view.edit, EditFlow::Idle);
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07", "2024-06-01"]);
    }

    #[tokio::test]
    async fn save_reply_after_logout_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let controller = Arc::new(signed_in(seeded_api(), dir.path()).await);
        let (entered, release) = install(&controller.api.save_gate);

        controller.select_day("2024-06-01").await.unwrap();
        let saving = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit(true, Some(2)).await })
        };
        entered.notified().await;
        controller.logout().await;
        release.notify_one();
        saving.await.unwrap().unwrap();

        let view = controller.view().await.unwrap();
        assert!(!view.authenticated);
        assert!(view.entries.is_empty());
        assert_eq!(view.edit, EditFlow::Idle);
    }

    #[tokio::test]
    async fn failed_years_fetch_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let api = seeded_api();
        api.fail_years.store(true, Ordering::SeqCst);
        let controller = signed_in(api, dir.path()).await;

        let view = controller.view().await.unwrap();
        assert_eq!(view.error.as_deref(), Some("years failed"));
        assert_eq!(keys(&view), ["2024-03-05", "2024-03-07"]);
    }

    #[tokio::test]
    async fn years_of_a_signed_out_account_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let api = seeded_api();
        api.years.lock().unwrap().push(2019);
        let controller = Arc::new(Controller::new(api, session_in(dir.path()), 2024));
        let (entered, release) = install(&controller.api.years_gate);

        let login = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.login(login_request()).await })
        };
        entered.notified().await;
        controller.logout().await;
        release.notify_one();
        login.await.unwrap().unwrap();

        let view = controller.view().await.unwrap();
        assert!(!view.authenticated);
        assert_eq!(view.years, [2024]);
    }

    #[tokio::test]
    async fn rejected_stored_session_signs_out_quietly() {
        let dir = tempfile::tempdir().unwrap();
        signed_in(seeded_api(), dir.path()).await;
        assert!(dir.path().join("session.json").exists());

        let api = seeded_api();
        api.reject_token.store(true, Ordering::SeqCst);
        let controller = Controller::new(api, session_in(dir.path()), 2024);
        controller.restore().await;

        let view = controller.view().await.unwrap();
        assert!(!view.authenticated);
        assert!(view.error.is_none());
        assert!(!dir.path().join("session.json").exists());
        assert!(!dir.path().join("session.cookie").exists());
    }

    #[tokio::test]
    async fn valid_stored_session_reloads_the_year() {
        let dir = tempfile::tempdir().unwrap();
        signed_in(seeded_api(), dir.path()).await;

        let controller = Controller::new(seeded_api(), session_in(dir.path()), 2024);
        controller.restore().await;
        let view = controller.view().await.unwrap();
        assert!(view.authenticated);
        assert_eq!(view.entries.len(), 2);
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let controller = signed_in(seeded_api(), dir.path()).await;
        controller.logout().await;

        let view = controller.view().await.unwrap();
        assert!(!view.authenticated);
        assert!(view.entries.is_empty());
        assert!(view.grid.is_none());
        assert!(!controller.session().await.authenticated);
        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn input_is_validated_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let controller = Controller::new(seeded_api(), session_in(dir.path()), 2024);

        let err = controller.select_year(2024).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err = controller
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");

        let err = controller
            .signup(SignupRequest {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "short".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        controller.login(login_request()).await.unwrap();
        assert_eq!(
            controller.submit(true, Some(2)).await.unwrap_err().status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            controller.select_day("2025-01-01").await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            controller.select_day("2024-02-30").await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );

        controller.select_day("2024-02-29").await.unwrap();
        assert_eq!(
            controller.submit(true, Some(7)).await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(controller.api.saves.load(Ordering::SeqCst), 0);
    }
}

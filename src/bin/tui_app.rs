use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// API response types (mirror the server's JSON shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsRow {
    pub product_name: String,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub median_price: f64,
    pub total_entries: u64,
    pub unit: String,
    pub price_change: Option<f64>,
    pub trend_direction: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionalRow {
    pub district: String,
    pub avg_price: f64,
    pub sample_size: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    pub product_name: String,
    pub overall_trend: String,
    pub percentage_change: f64,
    pub volatility: f64,
    pub seasonal_patterns: bool,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ObservedLocations {
    pub districts: Vec<String>,
    pub upazillas: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedEntry {
    pub id: i64,
    pub product_name: String,
    pub district: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub fields: Vec<FieldErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

impl ErrorBody {
    pub fn summary(&self) -> String {
        if self.fields.is_empty() {
            return self.error.clone();
        }
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect();
        parts.join("; ")
    }
}

// ---------------------------------------------------------------------------
// Persisted reporter preferences
// ---------------------------------------------------------------------------

/// Last-used reporter details, prefilled into the filters and the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    pub email: Option<String>,
    pub district: Option<String>,
    pub upazilla: Option<String>,
}

impl Prefs {
    /// `$XDG_CONFIG_HOME/bazar-dor/prefs.json` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bazar-dor").join("prefs.json"))
    }

    /// Missing or unreadable files give empty prefs.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// REPORTER_EMAIL / REPORTER_DISTRICT / REPORTER_UPAZILLA take precedence over the file.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("REPORTER_EMAIL") {
            self.email = Some(v);
        }
        if let Some(v) = get("REPORTER_DISTRICT") {
            self.district = Some(v);
        }
        if let Some(v) = get("REPORTER_UPAZILLA") {
            self.upazilla = Some(v);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Week,
    Month,
    Quarter,
}

impl DatePreset {
    pub fn days(self) -> u64 {
        match self {
            DatePreset::Week => 7,
            DatePreset::Month => 30,
            DatePreset::Quarter => 90,
        }
    }

    pub fn next(self) -> Self {
        match self {
            DatePreset::Week => DatePreset::Month,
            DatePreset::Month => DatePreset::Quarter,
            DatePreset::Quarter => DatePreset::Week,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Week => "last 7 days",
            DatePreset::Month => "last 30 days",
            DatePreset::Quarter => "last 90 days",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub preset: DatePreset,
    pub end: NaiveDate,
    pub district: Option<String>,
    pub upazilla: Option<String>,
    pub product: Option<String>,
}

impl Filters {
    pub fn new(end: NaiveDate) -> Self {
        Self { preset: DatePreset::Month, end, district: None, upazilla: None, product: None }
    }

    pub fn start(&self) -> NaiveDate {
        self.end
            .checked_sub_days(Days::new(self.preset.days()))
            .unwrap_or(self.end)
    }

    /// Query parameters shared by every analytics request.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut p = vec![
            ("startDate", self.start().to_string()),
            ("endDate", self.end.to_string()),
        ];
        if let Some(d) = &self.district {
            p.push(("district", d.clone()));
        }
        if let Some(u) = &self.upazilla {
            p.push(("upazilla", u.clone()));
        }
        if let Some(pr) = &self.product {
            p.push(("product", pr.clone()));
        }
        p
    }

    pub fn describe(&self) -> String {
        let location = match (&self.district, &self.upazilla) {
            (Some(d), Some(u)) => format!("{u}, {d}"),
            (Some(d), None) => d.clone(),
            _ => "All Locations".to_string(),
        };
        let product = self.product.as_deref().unwrap_or("all products");
        format!("{} │ {} │ {}", self.preset.label(), location, product)
    }
}

/// Step through `options`: none → first → ... → last → none.
pub fn cycle(options: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(cur) => {
            let pos = options.iter().position(|o| o.eq_ignore_ascii_case(cur));
            match pos {
                Some(i) => options.get(i + 1).cloned(),
                None => options.first().cloned(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Stale-response guard
// ---------------------------------------------------------------------------

/// Issues increasing sequence numbers; only the latest one is accepted.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub stats: Vec<StatsRow>,
    pub regional: Vec<RegionalRow>,
    pub trends: Vec<TrendRow>,
    pub locations: ObservedLocations,
}

#[derive(Debug)]
pub struct FetchResult {
    pub seq: u64,
    pub result: Result<DashboardData, String>,
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub http: reqwest::Client,
    pub base_url: String,
    pub auth_header: String,
    pub user_id: Option<String>,
}

impl ApiClient {
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let req = self.http.get(format!("{}{}", self.base_url, path));
        match &self.user_id {
            Some(id) => req.header(self.auth_header.as_str(), id),
            None => req,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, String> {
        let resp = self.get(path).query(params).send().await.map_err(|e| e.to_string())?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<ErrorBody>().await.unwrap_or_default();
            return Err(format!("{status}: {}", body.summary()));
        }
        resp.json::<T>().await.map_err(|e| format!("parse error: {e}"))
    }

    /// Stats, regional averages, trends and observed locations for one filter set.
    pub async fn fetch_dashboard(&self, filters: &Filters) -> Result<DashboardData, String> {
        let params = filters.params();
        let mut regional_params = params.clone();
        regional_params.push(("type", "districts".to_string()));
        let trend_params: Vec<(&'static str, String)> = params
            .iter()
            .filter(|(k, _)| *k != "product")
            .cloned()
            .chain(filters.product.clone().map(|p| ("products", p)))
            .collect();
        let location_params: Vec<(&'static str, String)> =
            filters.district.clone().map(|d| ("district", d)).into_iter().collect();

        let (stats, regional, trends, locations) = tokio::join!(
            self.get_json::<Vec<StatsRow>>("/api/analytics", &params),
            self.get_json::<Vec<RegionalRow>>("/api/analytics", &regional_params),
            self.get_json::<Vec<TrendRow>>("/api/analytics/trends", &trend_params),
            self.get_json::<ObservedLocations>("/api/locations/observed", &location_params),
        );

        Ok(DashboardData {
            stats: stats?,
            regional: regional?,
            trends: trends?,
            locations: locations?,
        })
    }

    pub async fn submit(&self, body: &EntryBody) -> Result<SavedEntry, String> {
        let mut req = self.http.post(format!("{}/api/entries", self.base_url)).json(body);
        if let Some(id) = &self.user_id {
            req = req.header(self.auth_header.as_str(), id);
        }
        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<ErrorBody>().await.unwrap_or_default();
            return Err(format!("{status}: {}", body.summary()));
        }
        resp.json::<SavedEntry>().await.map_err(|e| format!("parse error: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Entry form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryBody {
    pub user_email: String,
    pub district: String,
    pub upazilla: String,
    pub product_id: i64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub const FORM_LABELS: [&str; 7] = [
    "Email", "District", "Upazilla", "Product id", "Price", "Category", "Notes",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub values: [String; 7],
    pub focus: usize,
}

impl EntryForm {
    pub fn from_prefs(prefs: &Prefs) -> Self {
        let mut form = Self::default();
        form.values[0] = prefs.email.clone().unwrap_or_default();
        form.values[1] = prefs.district.clone().unwrap_or_default();
        form.values[2] = prefs.upazilla.clone().unwrap_or_default();
        form
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FORM_LABELS.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FORM_LABELS.len() - 1) % FORM_LABELS.len();
    }

    pub fn input(&mut self, c: char) {
        self.values[self.focus].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    /// Local shape checks only; catalog validation happens on the server.
    pub fn body(&self) -> Result<EntryBody, String> {
        let field = |i: usize| self.values[i].trim().to_string();
        let optional = |i: usize| Some(field(i)).filter(|v| !v.is_empty());

        let product_id = field(3)
            .parse::<i64>()
            .map_err(|_| "Product id must be a number".to_string())?;
        let price = field(4)
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| "Price must be a positive number".to_string())?;

        Ok(EntryBody {
            user_email: field(0),
            district: field(1),
            upazilla: field(2),
            product_id,
            price,
            category: optional(5),
            notes: optional(6),
        })
    }

    /// Reporter details worth remembering after a successful submit.
    pub fn prefs(&self) -> Prefs {
        let keep = |i: usize| Some(self.values[i].trim().to_string()).filter(|v| !v.is_empty());
        Prefs { email: keep(0), district: keep(1), upazilla: keep(2) }
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dashboard,
    Form,
}

pub struct AppState {
    pub status: ConnectionStatus,
    pub data: DashboardData,
    pub filters: Filters,
    pub tracker: RequestTracker,
    pub prefs: Prefs,
    pub prefs_path: Option<PathBuf>,
    pub mode: Mode,
    pub form: EntryForm,
    pub message: Option<String>,
    pub last_refresh: std::time::Instant,
}

impl AppState {
    pub fn new(prefs: Prefs, prefs_path: Option<PathBuf>) -> Self {
        let mut filters = Filters::new(Utc::now().date_naive());
        filters.district = prefs.district.clone();
        Self {
            status: ConnectionStatus::Connecting,
            data: DashboardData::default(),
            filters,
            tracker: RequestTracker::default(),
            form: EntryForm::from_prefs(&prefs),
            prefs,
            prefs_path,
            mode: Mode::Dashboard,
            message: None,
            last_refresh: std::time::Instant::now(),
        }
    }

    /// Start a background fetch for the current filters. Earlier fetches still
    /// in flight become stale.
    pub fn request_refresh(&mut self, api: &ApiClient, tx: &mpsc::UnboundedSender<FetchResult>) {
        let seq = self.tracker.issue();
        let api = api.clone();
        let filters = self.filters.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_dashboard(&filters).await;
            let _ = tx.send(FetchResult { seq, result });
        });
    }

    /// Apply a finished fetch. Returns false when it was superseded.
    pub fn apply(&mut self, fetched: FetchResult) -> bool {
        if !self.tracker.is_current(fetched.seq) {
            return false;
        }
        match fetched.result {
            Ok(data) => {
                self.data = data;
                self.status = ConnectionStatus::Connected;
                self.last_refresh = std::time::Instant::now();
            }
            Err(e) => self.status = ConnectionStatus::Error(e),
        }
        true
    }

    pub fn cycle_district(&mut self) {
        self.filters.district = cycle(&self.data.locations.districts, self.filters.district.as_deref());
        self.filters.upazilla = None;
    }

    pub fn cycle_upazilla(&mut self) {
        if self.filters.district.is_some() {
            self.filters.upazilla =
                cycle(&self.data.locations.upazillas, self.filters.upazilla.as_deref());
        }
    }

    pub fn cycle_product(&mut self) {
        let names: Vec<String> = self.data.stats.iter().map(|s| s.product_name.clone()).collect();
        self.filters.product = cycle(&names, self.filters.product.as_deref());
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::new(self.filters.end);
    }

    /// Remember the reporter after a successful submission.
    pub fn remember_reporter(&mut self) {
        self.prefs = self.form.prefs();
        if let Some(path) = &self.prefs_path {
            if let Err(e) = self.prefs.save_to(path) {
                self.message = Some(format!("could not save preferences: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

pub fn format_price(v: f64) -> String {
    format!("৳{:.2}", v)
}

pub fn format_change(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p > 0.0 => format!("+{:.1}%", p),
        Some(p) => format!("{:.1}%", p),
        None => "—".to_string(),
    }
}

pub fn trend_arrow(direction: Option<&str>) -> &'static str {
    match direction {
        Some("up") | Some("increasing") => "▲",
        Some("down") | Some("decreasing") => "▼",
        Some(_) => "▬",
        None => "—",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn stats(product: &str) -> DashboardData {
        DashboardData {
            stats: vec![StatsRow {
                product_name: product.into(),
                min_price: 1.0,
                max_price: 2.0,
                avg_price: 1.5,
                median_price: 1.5,
                total_entries: 2,
                unit: "kg".into(),
                price_change: None,
                trend_direction: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut app = AppState::new(Prefs::default(), None);
        let first = app.tracker.issue();
        let second = app.tracker.issue();

        // the newer request answers first
        assert!(app.apply(FetchResult { seq: second, result: Ok(stats("Onion")) }));
        assert!(!app.apply(FetchResult { seq: first, result: Ok(stats("Rice")) }));

        assert_eq!(app.data.stats[0].product_name, "Onion");
        assert_eq!(app.status, ConnectionStatus::Connected);
    }

    #[test]
    fn failed_latest_fetch_keeps_previous_data() {
        let mut app = AppState::new(Prefs::default(), None);
        let seq = app.tracker.issue();
        app.apply(FetchResult { seq, result: Ok(stats("Rice")) });
        let seq = app.tracker.issue();
        app.apply(FetchResult { seq, result: Err("timeout".into()) });
        assert_eq!(app.data.stats[0].product_name, "Rice");
        assert_eq!(app.status, ConnectionStatus::Error("timeout".into()));
    }

    #[test]
    fn cycle_walks_options_then_clears() {
        let opts = names(&["Dhaka", "Khulna"]);
        assert_eq!(cycle(&opts, None).as_deref(), Some("Dhaka"));
        assert_eq!(cycle(&opts, Some("dhaka")).as_deref(), Some("Khulna"));
        assert_eq!(cycle(&opts, Some("Khulna")), None);
        assert_eq!(cycle(&opts, Some("Sylhet")).as_deref(), Some("Dhaka"));
        assert_eq!(cycle(&[], None), None);
    }

    #[test]
    fn district_change_resets_upazilla() {
        let mut app = AppState::new(Prefs::default(), None);
        app.data.locations = ObservedLocations {
            districts: names(&["Dhaka"]),
            upazillas: names(&["Savar"]),
        };
        app.cycle_upazilla();
        assert_eq!(app.filters.upazilla, None);
        app.cycle_district();
        app.cycle_upazilla();
        assert_eq!(app.filters.upazilla.as_deref(), Some("Savar"));
        app.cycle_district();
        assert_eq!(app.filters.district, None);
        assert_eq!(app.filters.upazilla, None);
    }

    #[test]
    fn filter_params_cover_range_and_location() {
        let mut f = Filters::new(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        f.preset = DatePreset::Week;
        f.district = Some("Dhaka".into());
        let params = f.params();
        assert_eq!(params[0], ("startDate", "2024-03-24".to_string()));
        assert_eq!(params[1], ("endDate", "2024-03-31".to_string()));
        assert_eq!(params[2], ("district", "Dhaka".to_string()));
        assert_eq!(params.len(), 3);
        assert_eq!(f.describe(), "last 7 days │ Dhaka │ all products");
    }

    #[test]
    fn prefs_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        assert_eq!(Prefs::load_from(&path), Prefs::default());

        let prefs = Prefs {
            email: Some("karim@example.com".into()),
            district: Some("Dhaka".into()),
            upazilla: None,
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(Prefs::load_from(&path), prefs);
    }

    #[test]
    fn env_overrides_win() {
        let prefs = Prefs { district: Some("Dhaka".into()), ..Default::default() }.with_overrides(|k| {
            match k {
                "REPORTER_DISTRICT" => Some("Khulna".into()),
                "REPORTER_EMAIL" => Some("  ".into()),
                _ => None,
            }
        });
        assert_eq!(prefs.district.as_deref(), Some("Khulna"));
        assert_eq!(prefs.email, None);
    }

    #[test]
    fn form_is_prefilled_and_builds_body() {
        let prefs = Prefs {
            email: Some("karim@example.com".into()),
            district: Some("Dhaka".into()),
            upazilla: Some("Savar".into()),
        };
        let mut form = EntryForm::from_prefs(&prefs);
        form.focus = 3;
        form.input('1');
        form.next_field();
        for c in "72.5".chars() {
            form.input(c);
        }
        form.next_field();
        for c in "Miniketx".chars() {
            form.input(c);
        }
        form.backspace();

        let body = form.body().unwrap();
        assert_eq!(body.user_email, "karim@example.com");
        assert_eq!(body.upazilla, "Savar");
        assert_eq!(body.product_id, 1);
        assert_eq!(body.price, 72.5);
        assert_eq!(body.category.as_deref(), Some("Miniket"));
        assert_eq!(body.notes, None);
        assert_eq!(form.prefs(), prefs);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userEmail"], "karim@example.com");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn form_rejects_bad_numbers() {
        let mut form = EntryForm::default();
        assert!(form.body().is_err());
        form.values[3] = "1".into();
        form.values[4] = "-5".into();
        assert_eq!(form.body().unwrap_err(), "Price must be a positive number");
        form.prev_field();
        assert_eq!(form.focus, FORM_LABELS.len() - 1);
    }

    #[test]
    fn error_body_lists_fields() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"Invalid submission","fields":[{"field":"price","message":"Price must be a positive number"}]}"#,
        )
        .unwrap();
        assert_eq!(body.summary(), "price: Price must be a positive number");
    }

    #[test]
    fn formatting() {
        assert_eq!(format_price(90.0), "৳90.00");
        assert_eq!(format_change(Some(2.5)), "+2.5%");
        assert_eq!(format_change(Some(-1.26)), "-1.3%");
        assert_eq!(trend_arrow(Some("up")), "▲");
        assert_eq!(truncate("Soybean Oil", 8), "Soybean…");
        assert_eq!(truncate("ডাল", 8), "ডাল");
    }
}

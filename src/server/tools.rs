//! MCP tools, one per user interaction with the SoulBuddy pages

use std::sync::Arc;

use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    schemars::{self, schema_for},
    service::RequestContext,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::SoulBuddyApi;
use crate::chart::{render_svg, write_svg, ChartLayout, ChartSummary};
use crate::config::Config;
use crate::models::content::{self, BlogCategory, VideoCategory};
use crate::models::locations::{self, INDIAN_STATES};
use crate::models::ZodiacSign;
use crate::pages::{
    ChatPage, CategoryFilter, HoroscopePage, KundaliOutcome, KundaliPage, Navigation, Page,
    RecommendationsPage, Router, SubmitStatus,
};
use crate::state::{AppState, BirthForm, FormField, Store};

/// Input for switching pages
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct NavigateInput {
    #[schemars(description = "Page to show: home, kundali, horoscope, chat, recommendations, blog or videos")]
    pub page: Page,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct FieldUpdate {
    #[schemars(description = "Form field to change")]
    pub field: FormField,
    #[schemars(description = "New raw value; numbers are given as strings (e.g. \"1990\"), gender as M or F")]
    pub value: String,
}

/// Input for editing the birth form
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct UpdateBirthFormInput {
    #[schemars(description = "Field changes applied in order; if any is rejected, none is kept")]
    pub updates: Vec<FieldUpdate>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ListLocationsInput {
    #[schemars(description = "State value (e.g. 'maharashtra'); omit to list all states")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SignProfileInput {
    #[schemars(description = "Zodiac sign in lowercase (e.g. 'leo'); omit to list all twelve")]
    pub sign: Option<ZodiacSign>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct DailyHoroscopeInput {
    #[schemars(description = "Zodiac sign in lowercase (e.g. 'leo')")]
    pub sign: ZodiacSign,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ChatInput {
    #[schemars(description = "Message to send to the astrology assistant")]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct RecommendationsInput {
    #[schemars(description = "'all' (default) or one of crystals, books, practices, rituals")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct BlogInput {
    #[schemars(description = "Only posts of this category (astrology, mindfulness, rituals); omit for all")]
    pub category: Option<BlogCategory>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct VideosInput {
    #[schemars(description = "Only videos of this category (meditation, rituals, astrology); omit for all")]
    pub category: Option<VideoCategory>,
}

/// Successful tool output, or the message of a failed one
pub type ToolResult = Result<Value, String>;

fn schema_to_value<T: schemars::JsonSchema>() -> Arc<serde_json::Map<String, Value>> {
    match serde_json::to_value(schema_for!(T)) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn empty_schema() -> Arc<serde_json::Map<String, Value>> {
    let mut map = serde_json::Map::new();
    map.insert("type".into(), Value::String("object".into()));
    map.insert("properties".into(), Value::Object(serde_json::Map::new()));
    Arc::new(map)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn discarded(page: Page) -> Value {
    json!({
        "success": false,
        "status": "discarded",
        "message": format!("The {} page was left before the response arrived", page)
    })
}

/// MCP server driving one SoulBuddy session
#[derive(Clone)]
pub struct SoulBuddyServer {
    state: AppState,
    config: Arc<Config>,
    router: Arc<Mutex<Router>>,
    form: Arc<Mutex<BirthForm>>,
    kundali: Arc<Mutex<KundaliPage>>,
    kundali_loading: Store<bool>,
    chat: Arc<Mutex<ChatPage>>,
    recommendations: Arc<Mutex<RecommendationsPage>>,
    horoscope: Arc<Mutex<HoroscopePage>>,
}

impl SoulBuddyServer {
    pub fn new(config: Config, api: Arc<dyn SoulBuddyApi>) -> Self {
        let state = AppState::new();
        let kundali = KundaliPage::new(state.clone(), Arc::clone(&api));
        let kundali_loading = kundali.loading();
        Self {
            form: Arc::new(Mutex::new(BirthForm::open(state.form.clone()))),
            kundali: Arc::new(Mutex::new(kundali)),
            kundali_loading,
            chat: Arc::new(Mutex::new(ChatPage::new(
                state.clone(),
                Arc::clone(&api),
                config.chat_max_length,
            ))),
            recommendations: Arc::new(Mutex::new(RecommendationsPage::new(
                state.clone(),
                Arc::clone(&api),
            ))),
            horoscope: Arc::new(Mutex::new(HoroscopePage::new(api))),
            router: Arc::new(Mutex::new(Router::new())),
            config: Arc::new(config),
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn current_page(&self) -> Page {
        self.router.lock().await.current()
    }

    async fn enter(&self, page: Page) -> Navigation {
        self.router.lock().await.navigate(page, &self.state)
    }

    pub async fn navigate(&self, input: NavigateInput) -> ToolResult {
        let nav = self.enter(input.page).await;
        let mut response = json!({
            "success": true,
            "page": input.page,
            "call_to_action": nav.call_to_action,
        });
        if input.page == Page::Kundali {
            response["loading"] = json!(self.kundali_loading.get());
            response["form"] = to_value(self.form.lock().await.draft())?;
        }
        Ok(response)
    }

    pub async fn update_birth_form(&self, input: UpdateBirthFormInput) -> ToolResult {
        self.enter(Page::Kundali).await;
        let mut form = self.form.lock().await;
        form.apply(input.updates.iter().map(|u| (u.field, u.value.as_str())))
            .map_err(|(field, e)| format!("Invalid {}: {}", field.label(), e))?;
        Ok(json!({
            "success": true,
            "form": to_value(form.draft())?,
            "districts": to_value(&form.districts())?,
        }))
    }

    pub fn list_locations(&self, input: ListLocationsInput) -> ToolResult {
        match input.state {
            None => {
                let states: Vec<Value> = INDIAN_STATES
                    .iter()
                    .map(|s| json!({ "value": s.value, "label": s.label }))
                    .collect();
                Ok(json!({ "states": states }))
            }
            Some(value) => {
                let state = locations::find_state(&value)
                    .ok_or_else(|| format!("Unknown state: {}", value))?;
                Ok(json!({
                    "state": state.value,
                    "label": state.label,
                    "districts": to_value(&state.districts)?,
                }))
            }
        }
    }

    pub async fn submit_birth_form(&self) -> ToolResult {
        let nav = self.enter(Page::Kundali).await;
        let details = self
            .form
            .lock()
            .await
            .submit()
            .map_err(|e| format!("Invalid birth details: {}", e))?;

        let mut page = self.kundali.lock().await;
        match page.submit(details, &nav.scope).await {
            Ok(SubmitStatus::Discarded) => Ok(discarded(Page::Kundali)),
            Ok(SubmitStatus::Applied) => match page.result() {
                Some(outcome) => self.kundali_view(outcome),
                None => Err("Kundali result missing after submission".to_string()),
            },
            Err(e) => Err(page
                .alert()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string())),
        }
    }

    fn kundali_view(&self, outcome: &KundaliOutcome) -> ToolResult {
        let mut chart = json!({
            "image_base64_available": outcome.kundali.chart_base64.is_some(),
        });
        match outcome.chart_svg() {
            Some(Ok(svg)) => match write_svg(&self.config.chart_dir, &chart_file_name(outcome), &svg) {
                Ok(path) => {
                    info!("Wrote chart to {}", path.display());
                    chart["svg_path"] = json!(path);
                }
                Err(e) => {
                    warn!("Failed to write chart: {}", e);
                    chart["error"] = json!(e.to_string());
                }
            },
            Some(Err(e)) => {
                warn!("Chart data could not be drawn: {}", e);
                chart["error"] = json!(e.to_string());
            }
            None => {}
        }
        if let Some(Ok(summary)) = outcome.chart_summary() {
            chart["summary"] = to_value(&summary)?;
        }

        Ok(json!({
            "success": true,
            "birth_details": to_value(&outcome.details)?,
            "chart": chart,
            "analysis_text": outcome.kundali.analysis_text,
            "insights": to_value(&outcome.insight_cards())?,
            "horoscope": {
                "general": outcome.horoscope.general,
                "panels": to_value(&outcome.panels())?,
                "lucky_number": outcome.horoscope.lucky_number,
                "lucky_color": outcome.horoscope.lucky_color,
            }
        }))
    }

    pub async fn generate_another(&self) -> ToolResult {
        self.enter(Page::Kundali).await;
        self.kundali.lock().await.reset();
        Ok(json!({ "success": true, "form": to_value(self.form.lock().await.draft())? }))
    }

    /// SVG markup and summary panels of the current chart
    pub async fn render_chart(&self) -> ToolResult {
        let page = self.kundali.lock().await;
        let data = page
            .result()
            .and_then(|outcome| outcome.kundali.kundali_data.as_ref())
            .ok_or("No chart yet. Submit the birth form first.")?;
        let layout = ChartLayout::compute(data).map_err(|e| e.to_string())?;
        let summary = ChartSummary::build(data).map_err(|e| e.to_string())?;
        Ok(json!({
            "svg": render_svg(&layout),
            "summary": to_value(&summary)?,
        }))
    }

    pub async fn get_sign_profile(&self, input: SignProfileInput) -> ToolResult {
        self.enter(Page::Horoscope).await;
        match input.sign {
            Some(sign) => to_value(&self.horoscope.lock().await.select(sign)),
            None => Ok(json!({ "signs": to_value(&HoroscopePage::profiles())? })),
        }
    }

    pub async fn get_daily_horoscope(&self, input: DailyHoroscopeInput) -> ToolResult {
        let nav = self.enter(Page::Horoscope).await;
        let reading = self
            .horoscope
            .lock()
            .await
            .daily(input.sign, &nav.scope)
            .await
            .map_err(|e| format!("Failed to fetch daily horoscope: {}", e))?;
        match reading {
            Some(horoscope) => Ok(json!({
                "sign": input.sign,
                "horoscope": horoscope,
            })),
            None => Ok(discarded(Page::Horoscope)),
        }
    }

    pub async fn get_current_transits(&self) -> ToolResult {
        let nav = self.enter(Page::Horoscope).await;
        let transits = self
            .horoscope
            .lock()
            .await
            .transits(&nav.scope)
            .await
            .map_err(|e| format!("Failed to fetch current transits: {}", e))?;
        match transits {
            Some(transits) => Ok(json!({ "transits": to_value(&transits)? })),
            None => Ok(discarded(Page::Horoscope)),
        }
    }

    pub async fn send_chat_message(&self, input: ChatInput) -> ToolResult {
        let nav = self.enter(Page::Chat).await;
        let outcome = self.chat.lock().await.send(&input.message, &nav.scope).await;
        Ok(json!({
            "outcome": to_value(&outcome)?,
            "call_to_action": nav.call_to_action,
        }))
    }

    pub async fn get_chat_transcript(&self) -> ToolResult {
        let nav = self.enter(Page::Chat).await;
        let chat = self.chat.lock().await;
        let messages: Vec<_> = chat.transcript().messages().collect();
        Ok(json!({
            "messages": to_value(&messages)?,
            "call_to_action": nav.call_to_action,
        }))
    }

    pub async fn get_recommendations(&self, input: RecommendationsInput) -> ToolResult {
        let filter: CategoryFilter = input.category.as_deref().unwrap_or("all").parse()?;
        let nav = self.enter(Page::Recommendations).await;
        let mut page = self.recommendations.lock().await;
        let Some(view) = page.load(&nav.scope).await else {
            return Ok(discarded(Page::Recommendations));
        };
        Ok(json!({
            "source": view.source,
            "notice": view.notice,
            "call_to_action": nav.call_to_action,
            "recommendations": to_value(&view.filtered(filter))?,
        }))
    }

    pub async fn list_blog_posts(&self, input: BlogInput) -> ToolResult {
        self.enter(Page::Blog).await;
        Ok(json!({ "posts": to_value(&content::blog_posts(input.category))? }))
    }

    pub async fn list_videos(&self, input: VideosInput) -> ToolResult {
        self.enter(Page::Videos).await;
        Ok(json!({ "videos": to_value(&content::videos(input.category))? }))
    }

    fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "navigate",
                "Switch to another page. Leaving a page discards any of its requests still in flight. Chat and recommendations ask for birth details first when none are stored.",
                schema_to_value::<NavigateInput>(),
            ),
            Tool::new(
                "update_birth_form",
                "Edit fields of the kundali birth form. Choosing a state resets the district. A rejected change leaves the form as it was; the draft is kept while moving between pages.",
                schema_to_value::<UpdateBirthFormInput>(),
            ),
            Tool::new(
                "list_locations",
                "List Indian states, or the districts of one state, for the birth form location pickers.",
                schema_to_value::<ListLocationsInput>(),
            ),
            Tool::new(
                "submit_birth_form",
                "Validate the birth form, generate the kundali chart, then the daily horoscope. Returns the chart file, insights and horoscope panels.",
                empty_schema(),
            ),
            Tool::new(
                "generate_another",
                "Clear the current kundali result and the stored birth details to start over.",
                empty_schema(),
            ),
            Tool::new(
                "render_chart",
                "Get the SVG birth-chart diagram and summary panels for the current kundali.",
                empty_schema(),
            ),
            Tool::new(
                "get_sign_profile",
                "Get the profile of a zodiac sign (dates, element, ruling planet, traits), or all twelve.",
                schema_to_value::<SignProfileInput>(),
            ),
            Tool::new(
                "get_daily_horoscope",
                "Get today's horoscope for a zodiac sign.",
                schema_to_value::<DailyHoroscopeInput>(),
            ),
            Tool::new(
                "get_current_transits",
                "Get the current planetary transits.",
                empty_schema(),
            ),
            Tool::new(
                "send_chat_message",
                "Ask the astrology assistant a question. The last three exchanges are sent as context, with the stored birth details when present.",
                schema_to_value::<ChatInput>(),
            ),
            Tool::new(
                "get_chat_transcript",
                "Get the visible chat transcript (at most three exchanges).",
                empty_schema(),
            ),
            Tool::new(
                "get_recommendations",
                "Get crystal, book, practice and ritual recommendations, personalized when birth details are stored.",
                schema_to_value::<RecommendationsInput>(),
            ),
            Tool::new(
                "list_blog_posts",
                "List blog posts, optionally by category.",
                schema_to_value::<BlogInput>(),
            ),
            Tool::new(
                "list_videos",
                "List videos, optionally by category.",
                schema_to_value::<VideosInput>(),
            ),
        ]
    }
}

fn chart_file_name(outcome: &KundaliOutcome) -> String {
    let d = &outcome.details;
    format!(
        "kundali-{}{:02}{:02}-{:02}{:02}-{}",
        d.year,
        d.month,
        d.day,
        d.hour,
        d.minute,
        d.city.to_lowercase()
    )
}

impl ServerHandler for SoulBuddyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "SoulBuddy - astrology companion. Fill in the birth form with update_birth_form \
                 and submit_birth_form to get a kundali chart and daily horoscope; chat and \
                 recommendations are personalized from those details."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::ErrorData> {
        Ok(ListToolsResult {
            tools: self.get_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let args: Value = Value::Object(request.arguments.clone().unwrap_or_default());

        let result = match request.name.as_ref() {
            "navigate" => {
                let input: NavigateInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.navigate(input).await
            }
            "update_birth_form" => {
                let input: UpdateBirthFormInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.update_birth_form(input).await
            }
            "list_locations" => {
                let input: ListLocationsInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.list_locations(input)
            }
            "submit_birth_form" => self.submit_birth_form().await,
            "generate_another" => self.generate_another().await,
            "render_chart" => self.render_chart().await,
            "get_sign_profile" => {
                let input: SignProfileInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.get_sign_profile(input).await
            }
            "get_daily_horoscope" => {
                let input: DailyHoroscopeInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.get_daily_horoscope(input).await
            }
            "get_current_transits" => self.get_current_transits().await,
            "send_chat_message" => {
                let input: ChatInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.send_chat_message(input).await
            }
            "get_chat_transcript" => self.get_chat_transcript().await,
            "get_recommendations" => {
                let input: RecommendationsInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.get_recommendations(input).await
            }
            "list_blog_posts" => {
                let input: BlogInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.list_blog_posts(input).await
            }
            "list_videos" => {
                let input: VideosInput = serde_json::from_value(args)
                    .map_err(|e| rmcp::ErrorData::invalid_params(e.to_string(), None))?;
                self.list_videos(input).await
            }
            _ => {
                return Err(rmcp::ErrorData::invalid_params(
                    format!("Unknown tool: {}", request.name),
                    None,
                ))
            }
        };

        match result {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(pretty(&value))])),
            Err(message) => {
                warn!("Tool {} failed: {}", request.name, message);
                let body = json!({ "success": false, "error": message });
                Ok(CallToolResult::error(vec![Content::text(pretty(&body))]))
            }
        }
    }
}

//! AI coach service
//!
//! Prompt construction plus calls to the hosted text-generation endpoint.
//! The endpoint is opaque to the scoring core: a failed call surfaces as
//! an error message in the consuming screen and never touches the
//! analytics engine.

use crate::analytics::{CategoryTotal, FinanceSummary, GrowthSnapshot};
use crate::config;
use crate::database::Habit;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// System instruction sent with every coach request
const COACH_SYSTEM_INSTRUCTION: &str = "You are the PriMaX Hub growth coach. \
    Be encouraging but concrete: give short, actionable advice grounded in \
    the numbers you are shown. Never invent data the user did not provide.";

/// Configuration for the text-generation endpoint
#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CoachConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: config::DEFAULT_COACH_MODEL.to_string(),
            base_url: config::DEFAULT_COACH_BASE_URL.to_string(),
            timeout_secs: config::COACH_TIMEOUT_SECS,
        }
    }
}

/// Who authored a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One turn of a chat conversation. History is owned by the caller and
/// passed in explicitly; the service keeps no conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// ===== Wire types for the generateContent endpoint =====

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Service for AI coaching calls
#[derive(Clone)]
pub struct CoachService {
    client: reqwest::Client,
    coach_config: CoachConfig,
}

impl CoachService {
    pub fn new(coach_config: CoachConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("PriMaXHub-Coach")
            .timeout(std::time::Duration::from_secs(coach_config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            coach_config,
        })
    }

    /// Call the text-generation endpoint with a prompt, an optional
    /// system instruction and the caller's conversation history.
    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        history: &[ChatMessage],
    ) -> Result<String> {
        if self.coach_config.api_key.is_empty() {
            return Err(AppError::Generation(
                "No coach API key configured".to_string(),
            ));
        }

        let request = GenerateRequest {
            system_instruction: system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
            contents: build_contents(history, prompt),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.coach_config.base_url, self.coach_config.model, self.coach_config.api_key
        );

        tracing::info!("Requesting coach response ({})", self.coach_config.model);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("endpoint returned status {}", status)),
                Err(_) => format!("endpoint returned status {}", status),
            };

            tracing::warn!("Coach request failed: {}", message);
            return Err(AppError::Generation(message));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse coach response: {}", e);
            AppError::Generation(format!("unreadable endpoint response: {}", e))
        })?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(AppError::Generation(
                "Endpoint returned no text".to_string(),
            ));
        }

        Ok(text)
    }

    /// One chat turn against the caller-owned history.
    pub async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        self.generate(message, Some(COACH_SYSTEM_INSTRUCTION), history)
            .await
    }

    /// Daily briefing over the current growth snapshot.
    pub async fn daily_briefing(&self, snapshot: &GrowthSnapshot) -> Result<String> {
        self.generate(
            &daily_briefing_prompt(snapshot),
            Some(COACH_SYSTEM_INSTRUCTION),
            &[],
        )
        .await
    }

    /// Encouragement and tactics for one habit.
    pub async fn habit_coach(&self, habit: &Habit) -> Result<String> {
        self.generate(
            &habit_coach_prompt(habit),
            Some(COACH_SYSTEM_INSTRUCTION),
            &[],
        )
        .await
    }

    /// Budget advice over the finance summary.
    pub async fn finance_tips(
        &self,
        summary: &FinanceSummary,
        top_categories: &[CategoryTotal],
    ) -> Result<String> {
        self.generate(
            &finance_tips_prompt(summary, top_categories),
            Some(COACH_SYSTEM_INSTRUCTION),
            &[],
        )
        .await
    }

    /// Career planning advice from free-text inputs.
    pub async fn career_advice(&self, current_role: &str, goal: &str) -> Result<String> {
        self.generate(
            &career_advice_prompt(current_role, goal),
            Some(COACH_SYSTEM_INSTRUCTION),
            &[],
        )
        .await
    }
}

/// Assemble the contents array: bounded history plus the new user turn.
fn build_contents(history: &[ChatMessage], prompt: &str) -> Vec<Content> {
    let start = history.len().saturating_sub(config::MAX_CHAT_HISTORY);

    let mut contents: Vec<Content> = history[start..]
        .iter()
        .map(|m| Content {
            role: Some(m.role.as_str().to_string()),
            parts: vec![Part {
                text: m.content.clone(),
            }],
        })
        .collect();

    contents.push(Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: prompt.to_string(),
        }],
    });

    contents
}

// ===== Prompt builders =====

/// Prompt for the dashboard's daily briefing panel.
pub fn daily_briefing_prompt(snapshot: &GrowthSnapshot) -> String {
    let mut prompt = format!(
        "Here is my growth dashboard for {}.\n\
         Overall score: {}/100.\n\
         Productivity {}, Finance {}, Fitness {}, Mental {}.\n\
         Tasks done: {} of {}. Habits tracked: {}. Best current streak: {} days.\n",
        snapshot.generated_on,
        snapshot.scores.overall,
        snapshot.scores.productivity,
        snapshot.scores.finance,
        snapshot.scores.fitness,
        snapshot.scores.mental,
        snapshot.productivity.done_tasks,
        snapshot.productivity.total_tasks,
        snapshot.productivity.habit_count,
        snapshot.max_streak,
    );

    if !snapshot.has_any_data {
        prompt.push_str("I have not tracked anything yet.\n");
    }

    prompt.push_str("Give me a short daily briefing: one win to celebrate and the single most impactful next action.");
    prompt
}

/// Prompt for the habit detail coaching panel.
pub fn habit_coach_prompt(habit: &Habit) -> String {
    format!(
        "I am building the habit \"{}\" (area: {}). Current streak: {} days; \
         {} total completions. Suggest one concrete way to keep the streak \
         alive this week, in at most three sentences.",
        habit.name,
        habit.module,
        habit.streak,
        habit.completions.len(),
    )
}

/// Prompt for the finance coaching panel.
pub fn finance_tips_prompt(summary: &FinanceSummary, top_categories: &[CategoryTotal]) -> String {
    let mut prompt = format!(
        "This period I earned {:.2} and spent {:.2} (net {:.2}, savings rate {:.0}%).\n",
        summary.income,
        summary.expense,
        summary.net,
        summary.savings_rate * 100.0,
    );

    if !top_categories.is_empty() {
        prompt.push_str("Top spending categories:\n");
        for entry in top_categories {
            prompt.push_str(&format!("- {}: {:.2}\n", entry.category, entry.total));
        }
    }

    prompt.push_str("Give me two practical tips to improve my savings rate next month.");
    prompt
}

/// Prompt for the career planning panel.
pub fn career_advice_prompt(current_role: &str, goal: &str) -> String {
    format!(
        "I currently work as: {}. My career goal is: {}. Lay out three \
         concrete milestones for the next six months, each with a first step \
         I can take this week.",
        current_role, goal,
    )
}

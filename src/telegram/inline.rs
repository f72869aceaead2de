//! Inline query answering
//!
//! `@bot` in any chat → generate a size, add the membership bonus, classify,
//! record it, and offer two articles: today's measurement and the all-time average.

use teloxide::prelude::*;
use teloxide::types::{
    InlineQuery, InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText, User,
};

use crate::core::config;
use crate::core::membership::Membership;
use crate::core::metrics;
use crate::measure::{classify, generate_with, Entropy, ThreadEntropy};
use crate::storage::{StatsRecord, Store};
use crate::telegram::handlers::HandlerDeps;

pub const MEASURE_ARTICLE_ID: &str = "1";
pub const MEASURE_TITLE: &str = "Апщу бер";
pub const MEASURE_DESCRIPTION: &str = "Покажет, насколько большой у тебя апщу";

pub const STATS_ARTICLE_ID: &str = "2";
pub const STATS_TITLE: &str = "Твоя статистика";
pub const STATS_DESCRIPTION: &str = "Покажет твой средний размер";

/// Who asked. Mirrors the parts of [`User`] the bot stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl InlineUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: i64::try_from(user.id.0).unwrap_or(0),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }
}

/// Everything needed to render the two articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAnswer {
    /// Size after membership bonus
    pub size: i64,
    pub label: &'static str,
    /// All-time average, `None` if the store couldn't provide one
    pub average: Option<i64>,
}

impl InlineAnswer {
    pub fn measure_text(&self) -> String {
        format!("Сегодня ты дал Апщу на {}см. {}", self.size, self.label)
    }

    pub fn stats_text(&self) -> String {
        match self.average {
            Some(avg) => format!("Твой средний размер за всё время - {}см. {}", avg, classify(avg)),
            None => "Статистика сейчас недоступна, попробуй позже 🤷".to_string(),
        }
    }

    pub fn results(&self) -> Vec<InlineQueryResult> {
        vec![
            article(MEASURE_ARTICLE_ID, MEASURE_TITLE, self.measure_text(), MEASURE_DESCRIPTION),
            article(STATS_ARTICLE_ID, STATS_TITLE, self.stats_text(), STATS_DESCRIPTION),
        ]
    }
}

fn article(id: &str, title: &str, text: String, description: &str) -> InlineQueryResult {
    InlineQueryResult::Article(
        InlineQueryResultArticle::new(
            id,
            title,
            InputMessageContent::Text(InputMessageContentText::new(text)),
        )
        .description(description),
    )
}

/// Measures a user and records the result.
///
/// Store failures never fail the answer: a failed write is logged and skipped,
/// a failed average read leaves `average` empty.
pub async fn measure_user(
    store: &dyn Store,
    membership: &Membership,
    user: &InlineUser,
    entropy: &mut (impl Entropy + Send),
) -> InlineAnswer {
    let size = generate_with(entropy) + membership.bonus_for(user.id);
    let label = classify(size);

    let record = StatsRecord {
        user_id: user.id,
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
        size,
    };
    match store.record(&record).await {
        Ok(()) => log::info!("Saved size {} for user {} ({:?})", size, user.id, user.username),
        Err(e) => {
            metrics::record_store_failure("record");
            log::error!("Failed to save stats for user {}: {}", user.id, e);
        }
    }

    let average = match store.average_for(user.id).await {
        Ok(avg) => avg,
        Err(e) => {
            metrics::record_store_failure("average");
            log::error!("Failed to load average for user {}: {}", user.id, e);
            None
        }
    };

    InlineAnswer { size, label, average }
}

/// Dispatcher endpoint body for inline queries.
pub async fn handle_inline_query(bot: &Bot, query: &InlineQuery, deps: &HandlerDeps) {
    let user = InlineUser::from_user(&query.from);
    let answer = measure_user(deps.store.as_ref(), &deps.membership, &user, &mut ThreadEntropy).await;

    metrics::INLINE_QUERIES_TOTAL.inc();
    metrics::GENERATED_SIZE.observe(answer.size as f64);

    if let Err(e) = bot
        .answer_inline_query(query.id.clone(), answer.results())
        .is_personal(true)
        .cache_time(*config::inline::CACHE_TIME_SECS)
        .await
    {
        log::error!("Failed to answer inline query from user {}: {}", user.id, e);
    }
}

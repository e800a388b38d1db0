use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::application::ports::{
    ChatResponder, ChatUserRepository, ExpenseExtractor, ExtractionError, FileFetcher,
    RepositoryError, ResponderError, TransactionRepository, TranscriptionEngine,
    TranscriptionError,
};
use crate::application::services::voice_transcoder::{TranscodeError, VoiceTranscoder};
use crate::application::services::{
    aggregation, classifier, commands, draft_defaults, reply_resolver::ReplyResolver,
};
use crate::domain::{
    Category, ChatKind, ChatUser, ExpenseDraft, FinalizedExpense, InboundMessage, NewTransaction,
    PhotoSize, Transaction, TransactionPatch, VoiceClip,
};

use classifier::MessageKind;
use commands::BotCommand;

const APOLOGY: &str = "❌ Something went wrong, please try again.";
const DEFAULT_JUDGMENT: &str = "Spend wisely!";

const HELP_TEXT: &str = "🤖 Hi! Here is what I can do:\n\n\
📝 Record an expense:\n\
- Send the amount and a description as text\n\
- Send a photo of a receipt\n\
- Send a voice message\n\n\
📊 Statistics:\n\
/report - Spending from the start of the month until today\n\
/date [dd/MM/yyyy] - Spending on one day\n\
/month [MM/yyyy] - Spending in one month\n\n\
✏️ Managing expenses:\n\
/update - Update an expense (reply to its message with the new details)\n\
/delete - Delete an expense (reply to its message)\n\
/cancel - Same as delete\n\n\
🔄 Other:\n\
/start - Register with the bot\n\
/help - Show this message\n\n\
💡 Examples:\n\
- \"50k pho for lunch\"\n\
- \"groceries 120k this morning\"\n\
- \"fuel 200k\"";

/// Per-update state machine: Received -> Classified -> (Enriched) ->
/// Validated -> Persisted -> Replied, with early exits to an error reply
/// or to a terminal silent state. Holds no state across updates; every
/// collaborator is an injected handle.
pub struct Dispatcher {
    transactions: Arc<dyn TransactionRepository>,
    users: Arc<dyn ChatUserRepository>,
    extractor: Arc<dyn ExpenseExtractor>,
    transcription: Arc<dyn TranscriptionEngine>,
    transcoder: Arc<VoiceTranscoder>,
    files: Arc<dyn FileFetcher>,
    responder: Arc<dyn ChatResponder>,
    resolver: ReplyResolver,
}

#[derive(Debug, thiserror::Error)]
enum DispatchError {
    /// Corrective message for the user; not a system fault.
    #[error("{0}")]
    UserInput(String),
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("transcoding failed: {0}")]
    Transcode(#[from] TranscodeError),
    #[error("file fetch failed: {0}")]
    Fetch(#[from] crate::application::ports::FetchError),
    #[error("store failed: {0}")]
    Repository(#[from] RepositoryError),
    #[error("reply failed: {0}")]
    Responder(#[from] ResponderError),
    #[error("scratch i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Dispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        users: Arc<dyn ChatUserRepository>,
        extractor: Arc<dyn ExpenseExtractor>,
        transcription: Arc<dyn TranscriptionEngine>,
        transcoder: Arc<VoiceTranscoder>,
        files: Arc<dyn FileFetcher>,
        responder: Arc<dyn ChatResponder>,
    ) -> Self {
        let resolver = ReplyResolver::new(Arc::clone(&transactions));
        Self {
            transactions,
            users,
            extractor,
            transcription,
            transcoder,
            files,
            responder,
            resolver,
        }
    }

    /// Entry point for one inbound update. Failures terminate only this
    /// update: user-input problems get their corrective message, external
    /// faults get one generic apology, and neither propagates.
    pub async fn handle_update(&self, message: InboundMessage) {
        let chat_id = message.chat.id;

        match self.route(&message).await {
            Ok(()) => {}
            Err(DispatchError::UserInput(hint)) => {
                tracing::debug!(chat_id, message_id = message.message_id, hint = %hint, "Rejected user input");
                if let Err(e) = self.responder.send_text(chat_id, &hint).await {
                    tracing::warn!(error = %e, chat_id, "Failed to deliver corrective reply");
                }
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    chat_id,
                    message_id = message.message_id,
                    "Update pipeline failed"
                );
                if let Err(e) = self.responder.send_text(chat_id, APOLOGY).await {
                    tracing::warn!(error = %e, chat_id, "Failed to deliver apology reply");
                }
            }
        }
    }

    async fn route(&self, message: &InboundMessage) -> Result<(), DispatchError> {
        match classifier::classify(message) {
            MessageKind::Command { name, args } => self.handle_command(message, &name, &args).await,
            MessageKind::Photo(photos) => self.handle_photo(message, &photos).await,
            MessageKind::Voice(clip) => self.handle_voice(message, &clip).await,
            MessageKind::Text(body) => self.handle_text(message, &body).await,
            MessageKind::Ignored => Ok(()),
        }
    }

    async fn handle_command(
        &self,
        message: &InboundMessage,
        name: &str,
        args: &[String],
    ) -> Result<(), DispatchError> {
        let today = Local::now().date_naive();

        let command = match commands::parse(name, args, today) {
            Ok(command) => command,
            Err(commands::CommandError::InvalidDate) => {
                return Err(DispatchError::UserInput(
                    "❌ Invalid date format. Use: /date dd, /date dd/MM or /date dd/MM/yyyy"
                        .to_string(),
                ));
            }
            Err(commands::CommandError::InvalidMonth) => {
                return Err(DispatchError::UserInput(
                    "❌ Invalid month format. Use: /month, /month MM or /month MM/yyyy".to_string(),
                ));
            }
        };

        match command {
            BotCommand::Start => self.handle_start(message).await,
            BotCommand::Help => {
                self.responder.send_text(message.chat.id, HELP_TEXT).await?;
                Ok(())
            }
            BotCommand::Report => self.handle_report(message, today).await,
            BotCommand::Date(date) => self.handle_date(message, date).await,
            BotCommand::Month { year, month } => self.handle_month(message, year, month).await,
            BotCommand::Update => self.handle_update_command(message, args).await,
            BotCommand::Delete => self.handle_delete(message).await,
            // Unknown commands stay silent, like any other unsupported payload.
            BotCommand::Unknown => Ok(()),
        }
    }

    async fn handle_start(&self, message: &InboundMessage) -> Result<(), DispatchError> {
        let user = self.ensure_registered(message).await?;

        let greeting = match message.chat.kind {
            ChatKind::Private => format!("Welcome {}!", user.display_name()),
            ChatKind::Group => format!(
                "Hello! This group \"{}\" has been registered.",
                user.group_name.as_deref().unwrap_or("group")
            ),
        };

        self.responder.send_text(message.chat.id, &greeting).await?;
        Ok(())
    }

    /// Find-or-create: running /start twice leaves exactly one record.
    async fn ensure_registered(&self, message: &InboundMessage) -> Result<ChatUser, DispatchError> {
        if let Some(existing) = self.users.find_by_chat_id(message.chat.id).await? {
            return Ok(existing);
        }

        let now = chrono::Utc::now();
        let mut user = ChatUser {
            chat_id: message.chat.id,
            username: None,
            first_name: None,
            last_name: None,
            group_name: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match message.chat.kind {
            ChatKind::Private => {
                if let Some(sender) = &message.sender {
                    user.username = sender.username.clone();
                    user.first_name = sender.first_name.clone();
                    user.last_name = sender.last_name.clone();
                }
            }
            ChatKind::Group => {
                user.group_name = message.chat.title.clone();
            }
        }

        self.users.create(&user).await?;
        tracing::info!(chat_id = user.chat_id, "New chat registered");
        Ok(user)
    }

    async fn handle_text(&self, message: &InboundMessage, body: &str) -> Result<(), DispatchError> {
        let draft = self.extractor.extract_from_text(body).await?;
        self.record_expense(message, draft).await
    }

    async fn handle_photo(
        &self,
        message: &InboundMessage,
        photos: &[PhotoSize],
    ) -> Result<(), DispatchError> {
        self.responder
            .send_text(message.chat.id, "🔍 Analyzing the receipt...")
            .await?;

        let mut draft = self.extract_from_photos(photos).await?;
        draft.full_text = "Receipt image".to_string();

        self.record_expense(message, draft).await
    }

    async fn handle_voice(
        &self,
        message: &InboundMessage,
        clip: &VoiceClip,
    ) -> Result<(), DispatchError> {
        self.responder
            .send_text(message.chat.id, "🎤 Processing the voice message...")
            .await?;

        let transcript = {
            let audio = self.transcoder.transcode(clip).await?;
            let bytes = tokio::fs::read(audio.path()).await?;
            self.transcription.transcribe(&bytes).await?
            // `audio` drops here, removing the converted artifact.
        };

        self.responder
            .send_text(message.chat.id, &format!("🗣️ Heard: {}", transcript))
            .await?;

        self.handle_text(message, &transcript).await
    }

    /// Shared tail of the text/photo/voice pipelines: validate + default,
    /// persist, confirm. An unusable draft is a soft no-op: no record, no
    /// reply, no log entry.
    async fn record_expense(
        &self,
        message: &InboundMessage,
        draft: ExpenseDraft,
    ) -> Result<(), DispatchError> {
        let Some(expense) = draft_defaults::finalize(draft, Local::now().naive_local()) else {
            return Ok(());
        };

        let created = self
            .transactions
            .create(&NewTransaction {
                source_message_id: message.message_id,
                chat_user_id: message.chat.id,
                amount: expense.amount,
                location: expense.location.clone(),
                fulltext: Some(expense.full_text.clone()),
                date: expense.date,
                time: Some(expense.time),
                category: expense.category,
            })
            .await?;

        let footer = self.daily_totals_footer(message.chat.id).await?;
        let confirmation = format_confirmation(&created, &expense, &footer);
        self.responder
            .send_text(message.chat.id, &confirmation)
            .await?;

        Ok(())
    }

    async fn handle_update_command(
        &self,
        message: &InboundMessage,
        args: &[String],
    ) -> Result<(), DispatchError> {
        let target = self.resolve_reply_target(message, "update").await?;

        let draft = if !message.photo.is_empty() {
            self.responder
                .send_text(message.chat.id, "🔍 Analyzing the new receipt...")
                .await?;
            self.extract_from_photos(&message.photo).await?
        } else {
            let body = args.join(" ");
            if body.trim().is_empty() {
                return Err(DispatchError::UserInput(
                    "❌ Include the new expense details after /update.".to_string(),
                ));
            }
            self.extractor.extract_from_text(&body).await?
        };

        // No defaulting on update: only fields the backend actually
        // produced (and that are valid) overwrite the record.
        let patch = TransactionPatch::from_draft(&draft);
        let updated = self.transactions.update(target.id, &patch).await?;

        let judgment = draft.judgment.as_deref().unwrap_or(DEFAULT_JUDGMENT);
        let reply = format!(
            "✅ Expense updated:\n💰 {}đ\n📍 {}\n🏷️ {}\n📅 {}\n⏰ {}\n💭 {}",
            format_amount(updated.amount),
            updated.location.as_deref().unwrap_or("No location"),
            updated.category.unwrap_or(Category::Other),
            updated.date.format("%d/%m/%Y"),
            updated
                .time
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            judgment,
        );
        self.responder.send_text(message.chat.id, &reply).await?;

        Ok(())
    }

    async fn handle_delete(&self, message: &InboundMessage) -> Result<(), DispatchError> {
        let target = self.resolve_reply_target(message, "delete").await?;

        self.transactions.delete(target.id).await?;

        let reply = format!("✅ Deleted expense of {}đ", format_amount(target.amount));
        self.responder.send_text(message.chat.id, &reply).await?;

        Ok(())
    }

    async fn resolve_reply_target(
        &self,
        message: &InboundMessage,
        action: &str,
    ) -> Result<Transaction, DispatchError> {
        let Some(reply_to) = message.reply_to else {
            return Err(DispatchError::UserInput(format!(
                "❌ Reply to the expense message you want to {}.",
                action
            )));
        };

        self.resolver
            .resolve(reply_to, message.chat.id)
            .await?
            .ok_or_else(|| {
                DispatchError::UserInput(format!(
                    "❌ Expense not found, or you do not have permission to {} it.",
                    action
                ))
            })
    }

    async fn handle_date(
        &self,
        message: &InboundMessage,
        date: NaiveDate,
    ) -> Result<(), DispatchError> {
        let transactions = self
            .transactions
            .find_by_date(message.chat.id, date)
            .await?;

        if transactions.is_empty() {
            let reply = format!("No expenses recorded on {}.", date.format("%d/%m/%Y"));
            self.responder.send_text(message.chat.id, &reply).await?;
            return Ok(());
        }

        let totals = aggregation::summarize(&transactions);
        let reply = format!(
            "📊 Spending on {}:\n\n💰 Total: {}đ\n\n🏷️ By category:\n{}",
            date.format("%d/%m/%Y"),
            format_amount(totals.total),
            format_category_lines(&totals),
        );
        self.responder.send_text(message.chat.id, &reply).await?;

        Ok(())
    }

    async fn handle_month(
        &self,
        message: &InboundMessage,
        year: i32,
        month: u32,
    ) -> Result<(), DispatchError> {
        let Some((start, end)) = commands::month_bounds(year, month) else {
            return Err(DispatchError::UserInput(
                "❌ Invalid month format. Use: /month, /month MM or /month MM/yyyy".to_string(),
            ));
        };

        let transactions = self
            .transactions
            .find_by_date_range(message.chat.id, start, end)
            .await?;

        if transactions.is_empty() {
            let reply = format!("No expenses recorded in {:02}/{}.", month, year);
            self.responder.send_text(message.chat.id, &reply).await?;
            return Ok(());
        }

        let totals = aggregation::summarize(&transactions);
        let reply = format!(
            "📊 Spending in {:02}/{}:\n\n💰 Total: {}đ\n\n🏷️ By category:\n{}",
            month,
            year,
            format_amount(totals.total),
            format_category_lines(&totals),
        );
        self.responder.send_text(message.chat.id, &reply).await?;

        Ok(())
    }

    /// Range report over [first day of the current month, today].
    async fn handle_report(
        &self,
        message: &InboundMessage,
        today: NaiveDate,
    ) -> Result<(), DispatchError> {
        let start = first_day_of_month(today);

        let transactions = self
            .transactions
            .find_by_date_range(message.chat.id, start, today)
            .await?;

        if transactions.is_empty() {
            self.responder
                .send_text(message.chat.id, "No expenses recorded this month.")
                .await?;
            return Ok(());
        }

        let report = aggregation::summarize_by_day(&transactions);

        let mut reply = format!(
            "📊 Expense report {:02}/{}\n\n💰 Total: {}đ\n\n📅 By day:\n",
            today.month(),
            today.year(),
            format_amount(report.grand_total),
        );
        for day in &report.days {
            reply.push_str(&format!(
                "\n📌 {}\nTotal: {}đ\n{}",
                day.date.format("%d/%m/%Y"),
                format_amount(day.totals.total),
                format_category_lines(&day.totals),
            ));
        }

        self.responder.send_text(message.chat.id, &reply).await?;

        Ok(())
    }

    async fn extract_from_photos(
        &self,
        photos: &[PhotoSize],
    ) -> Result<ExpenseDraft, DispatchError> {
        // Highest-resolution rendition gives the backend the best shot.
        let best = photos
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
            .ok_or_else(|| {
                DispatchError::UserInput("❌ The photo could not be read.".to_string())
            })?;

        let image = self.files.fetch(&best.file_id).await?;
        let draft = self.extractor.extract_from_image(&image).await?;
        Ok(draft)
    }

    async fn daily_totals_footer(&self, chat_user_id: i64) -> Result<String, RepositoryError> {
        let today = Local::now().date_naive();
        let today_total = aggregation::summarize(
            &self.transactions.find_by_date(chat_user_id, today).await?,
        )
        .total;

        let yesterday_total = match today.pred_opt() {
            Some(yesterday) => {
                aggregation::summarize(
                    &self
                        .transactions
                        .find_by_date(chat_user_id, yesterday)
                        .await?,
                )
                .total
            }
            None => 0,
        };

        Ok(format!(
            "\n\n📅 Totals:\n- Today: {}đ\n- Yesterday: {}đ",
            format_amount(today_total),
            format_amount(yesterday_total),
        ))
    }
}

fn format_confirmation(created: &Transaction, expense: &FinalizedExpense, footer: &str) -> String {
    format!(
        "✅ Expense recorded:\n💰 {}đ\n📍 {}\n🏷️ {}\n📅 {}\n⏰ {}\n💭 {}{}",
        format_amount(created.amount),
        created.location.as_deref().unwrap_or("No location"),
        created.category.unwrap_or(Category::Other),
        created.date.format("%d/%m/%Y"),
        expense.time.format("%H:%M:%S"),
        expense.judgment.as_deref().unwrap_or(DEFAULT_JUDGMENT),
        footer,
    )
}

fn format_category_lines(totals: &aggregation::WindowTotals) -> String {
    totals
        .by_category
        .iter()
        .map(|(category, amount)| format!("- {}: {}đ", category, format_amount(*amount)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Thousands separators for whole currency units: 1234567 -> "1,234,567".
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

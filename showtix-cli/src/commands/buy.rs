//! `showtix buy`: the interactive purchase form.

use std::fmt::Display;
use std::io;
use std::io::Write;
use std::time::Duration;

use chrono::Local;
use log::warn;
use showtix_lib::api::TicketApi;
use showtix_lib::model::{CardType, Field, ShowId};
use showtix_lib::workflow::{PurchaseForm, Redirect, Route, SubmissionState, schedule_redirect};
use showtix_lib::{Config, ShowsClient};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::commands::{list, show};
use crate::error::Result;

/// How long the show lookup may still run once every field is filled in.
const SHOW_LOOKUP_GRACE: Duration = Duration::from_secs(2);

/// Line-oriented question and answer over any reader and writer.
pub struct Prompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Prompter<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    /// Asks a question and returns the trimmed answer.
    async fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into()),
        }
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}

pub async fn run(client: &ShowsClient, config: &Config, id: ShowId) -> Result<()> {
    let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()), io::stdout());
    let Some(redirect) = purchase(client, &mut prompter, id, config.redirect_delay).await? else {
        return Ok(());
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let handle = schedule_redirect(redirect, tx, cancel.clone());

    tokio::select! {
        route = rx.recv() => match route {
            Some(Route::ShowDetails(id)) => {
                println!();
                show::run(client, config, &id).await?;
            }
            Some(Route::Home) => list::run(client, None).await?,
            _ => {}
        },
        _ = tokio::signal::ctrl_c() => cancel.cancel(),
    }

    let _ = handle.await;
    Ok(())
}

/// Runs the purchase form until it succeeds or the customer gives up.
///
/// Returns the pending redirect on success.
pub async fn purchase<R, W>(
    api: &dyn TicketApi,
    prompter: &mut Prompter<R, W>,
    id: ShowId,
    redirect_delay: Duration,
) -> Result<Option<Redirect>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = PurchaseForm::open(id.clone()).with_redirect_delay(redirect_delay);

    // Show lookup runs alongside the prompts; it gets SHOW_LOOKUP_GRACE once
    // they finish.
    let show = {
        let lookup = PurchaseForm::fetch_show(api, &id);
        let prompts = prompt_all(&mut form, prompter);
        tokio::pin!(lookup, prompts);

        tokio::select! {
            show = &mut lookup => (&mut prompts).await.map(|()| show),
            prompted = &mut prompts => match prompted {
                Ok(()) => Ok(tokio::time::timeout(SHOW_LOOKUP_GRACE, &mut lookup)
                    .await
                    .ok()
                    .flatten()),
                Err(e) => Err(e),
            },
        }
    }?;
    form.set_show(show);

    loop {
        let state = form.submit(api, Local::now().date_naive()).await;
        if let Some(banner) = form.banner() {
            prompter.say(&banner.text)?;
        }

        match state {
            SubmissionState::Success => return Ok(form.redirect().cloned()),
            SubmissionState::Invalid => {
                let invalid: Vec<(Field, String)> = form
                    .errors()
                    .errors()
                    .iter()
                    .map(|(field, message)| (*field, message.clone()))
                    .collect();

                for (field, message) in invalid {
                    prompter.say(format!("  {}: {}", field.label(), message))?;
                    prompt_field(&mut form, prompter, field).await?;
                }
            }
            SubmissionState::Failed => {
                let answer = prompter.ask("Try again? [Y/n] ").await?;
                if matches!(answer.to_ascii_lowercase().as_str(), "n" | "no") {
                    return Ok(None);
                }
            }
            other => {
                warn!("Submit settled in unexpected state {:?}", other);
                return Ok(None);
            }
        }
    }
}

async fn prompt_all<R, W>(form: &mut PurchaseForm, prompter: &mut Prompter<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for field in Field::ALL {
        prompt_field(form, prompter, field).await?;
    }
    Ok(())
}

/// Prompts for one field until the input parses. A blank answer keeps the
/// current value.
async fn prompt_field<R, W>(
    form: &mut PurchaseForm,
    prompter: &mut Prompter<R, W>,
    field: Field,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let hint = match field {
        Field::CardType => {
            let names: Vec<_> = CardType::ALL.iter().map(|c| c.name()).collect();
            format!(" ({})", names.join(", "))
        }
        _ => String::new(),
    };

    loop {
        let current = form.request().value(field);
        let question = if current.is_empty() {
            format!("{}{}: ", field.label(), hint)
        } else {
            format!("{}{} [{}]: ", field.label(), hint, current)
        };

        let answer = prompter.ask(&question).await?;
        if answer.is_empty() && !current.is_empty() {
            return Ok(());
        }

        match form.set_field(field, &answer) {
            Ok(()) => return Ok(()),
            Err(e) => prompter.say(format!("  {}", e))?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use showtix_lib::error::ApiError;
    use showtix_lib::model::{PurchaseRequest, Show};

    use super::*;

    /// Answers purchases from a script, one reply per call.
    struct ScriptedApi {
        replies: Mutex<Vec<std::result::Result<(), ApiError>>>,
        sent: Mutex<Vec<PurchaseRequest>>,
        show_delay: Option<Duration>,
    }

    impl ScriptedApi {
        fn new(mut replies: Vec<std::result::Result<(), ApiError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                sent: Mutex::new(Vec::new()),
                show_delay: None,
            }
        }

        fn with_slow_show(mut self, delay: Duration) -> Self {
            self.show_delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl TicketApi for ScriptedApi {
        async fn get_show(&self, _id: &ShowId) -> std::result::Result<Show, ApiError> {
            if let Some(delay) = self.show_delay {
                tokio::time::sleep(delay).await;
            }
            Ok(Show::new(7, "Night Owls"))
        }

        async fn submit_purchase(
            &self,
            request: &PurchaseRequest,
        ) -> std::result::Result<(), ApiError> {
            self.sent.lock().unwrap().push(request.clone());
            self.replies.lock().unwrap().pop().unwrap_or(Ok(()))
        }
    }

    const ANSWERS: &str = "2\nAda\nLovelace\nada@example\n555-123-4567\n12 Analytical Way\n\
                           Diners\nMastercard\n5555 4444 3333 2222\n12/99\n123\n";

    async fn run_form(api: &ScriptedApi, input: String) -> (Option<Redirect>, String) {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(input.as_bytes(), &mut out);
        let redirect = purchase(api, &mut prompter, ShowId::from(7), Duration::from_secs(3))
            .await
            .unwrap();
        drop(prompter);
        (redirect, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_reprompts_invalid_fields_then_confirms() {
        let api = ScriptedApi::new(vec![Ok(())]);
        let input = format!("{}ada@example.com\n", ANSWERS);

        let (redirect, out) = run_form(&api, input).await;

        assert!(out.contains("  'Diners' is not a valid value for CreditCardType\n"));
        assert!(out.contains("Please fix the errors in the form before submitting."));
        assert!(out.contains("  Email: Please enter a valid email address"));
        assert!(out.contains("Success! You purchased 2 tickets for Night Owls."));
        assert_eq!(redirect.unwrap().route, Route::ShowDetails(ShowId::from(7)));

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ada@example.com");
        assert_eq!(sent[0].card_type, CardType::Mastercard);
    }

    #[tokio::test]
    async fn test_failure_offers_retry() {
        let api = ScriptedApi::new(vec![
            Err(ApiError::rejected(400, r#"{"error":"Card declined"}"#, "Card declined")),
            Ok(()),
        ]);
        let input = format!("{}ada@example.com\ny\n", ANSWERS);

        let (redirect, out) = run_form(&api, input).await;

        assert!(out.contains("Card declined\nTry again? [Y/n] "));
        assert!(redirect.is_some());
        assert_eq!(api.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_declining_retry_gives_up() {
        let api = ScriptedApi::new(vec![Err(ApiError::Timeout(Duration::from_secs(30)))]);
        let input = format!("{}ada@example.com\nn\n", ANSWERS);

        let (redirect, out) = run_form(&api, input).await;

        assert!(out.contains("Network error. Please check your connection and try again."));
        assert!(redirect.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_show_lookup_does_not_hold_up_purchase() {
        let api = ScriptedApi::new(vec![Ok(())]).with_slow_show(Duration::from_secs(3600));
        let input = format!("{}ada@example.com\n", ANSWERS);
        let started = tokio::time::Instant::now();

        let (redirect, out) = run_form(&api, input).await;

        assert!(started.elapsed() <= SHOW_LOOKUP_GRACE);
        assert!(redirect.is_some());
        assert!(out.contains(
            "Success! You purchased 2 tickets. A confirmation email will be sent to ada@example.com."
        ));
    }
}

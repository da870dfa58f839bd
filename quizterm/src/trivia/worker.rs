//! Background thread that owns the blocking HTTP client for its lifetime.
//!
//! All communication is via channels: `FetchRequest` in, `AppEvent::Trivia`
//! out. The event loop never blocks on the network.

use std::time::Duration;

use crossbeam_channel::Receiver;
use quizterm_core::{Difficulty, Question};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::trivia::types::{ApiResponse, FetchError, FetchOutcome, FetchRequest};

/// Entry point for the trivia worker thread.
///
/// Builds the HTTP client inside the thread and loops over incoming requests
/// until the request channel closes. Every request gets exactly one outcome.
pub fn trivia_worker_loop(
    api_url: String,
    rx: Receiver<FetchRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("quizterm/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| e.to_string());
    if let Err(ref e) = client {
        log::error!("trivia: could not build HTTP client: {}", e);
    }

    for request in rx {
        log::info!(
            "trivia: fetching {} {} questions (request {})",
            request.amount,
            request.difficulty,
            request.request_id
        );
        let result = match client {
            Ok(ref c) => fetch_questions(c, &api_url, &request),
            Err(ref e) => Err(FetchError::ClientUnavailable(e.clone())),
        };
        match result {
            Ok(ref qs) => log::info!("trivia: request {} got {} questions", request.request_id, qs.len()),
            Err(ref e) => log::error!("trivia: request {} failed: {}", request.request_id, e),
        }
        let outcome = FetchOutcome {
            request_id: request.request_id,
            difficulty: request.difficulty,
            result,
        };
        if event_tx.send(AppEvent::Trivia(Box::new(outcome))).is_err() {
            break;
        }
    }
}

/// Performs one `GET` against the trivia API and converts the body.
fn fetch_questions(
    client: &reqwest::blocking::Client,
    api_url: &str,
    request: &FetchRequest,
) -> Result<Vec<Question>, FetchError> {
    let response = client
        .get(api_url)
        .query(&[
            ("amount", request.amount.to_string()),
            ("difficulty", request.difficulty.as_str().to_owned()),
            ("type", "multiple".to_owned()),
        ])
        .send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status()));
    }

    let body = response.text()?;
    let parsed: ApiResponse = serde_json::from_str(&body)?;
    into_questions(parsed, request, &mut rand::rng())
}

/// Decodes entities, shuffles options, and locates the correct answer.
///
/// Ids are `q1..qN` in response order. At most `request.amount` questions are
/// kept. Entries whose decoded text yields fewer than two options are skipped.
pub fn into_questions<R: Rng + ?Sized>(
    response: ApiResponse,
    request: &FetchRequest,
    rng: &mut R,
) -> Result<Vec<Question>, FetchError> {
    if response.response_code != 0 {
        return Err(FetchError::Api(response.response_code));
    }

    let questions: Vec<Question> = response
        .results
        .into_iter()
        .filter_map(|raw| {
            let correct = decode(&raw.correct_answer);
            let mut options: Vec<String> = raw.incorrect_answers.iter().map(|a| decode(a)).collect();
            options.push(correct.clone());
            if options.len() < 2 {
                return None;
            }
            options.shuffle(rng);
            let correct_index = options.iter().position(|o| *o == correct)?;
            Some((raw, options, correct_index))
        })
        .take(request.amount as usize)
        .enumerate()
        .map(|(i, (raw, options, correct_index))| Question {
            id: format!("q{}", i + 1),
            category: decode(&raw.category),
            difficulty: raw.difficulty.parse::<Difficulty>().unwrap_or(request.difficulty),
            question: decode(&raw.question),
            options,
            correct_index,
        })
        .collect();

    if questions.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(questions)
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "hard",
                "category": "Entertainment: Video Games",
                "question": "Which &quot;Portal&quot; character says &#039;The cake is a lie&#039;?",
                "correct_answer": "Doug Rattmann",
                "incorrect_answers": ["GLaDOS", "Wheatley", "Cave Johnson"]
            },
            {
                "type": "multiple",
                "difficulty": "hard",
                "category": "Science &amp; Nature",
                "question": "What is the chemical symbol for tungsten?",
                "correct_answer": "W",
                "incorrect_answers": ["Tu", "Tn", "Wo"]
            }
        ]
    }"#;

    fn request(amount: u32) -> FetchRequest {
        FetchRequest { request_id: 7, difficulty: Difficulty::Hard, amount }
    }

    #[test]
    fn converts_and_decodes_sample() {
        let parsed: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let questions = into_questions(parsed, &request(10), &mut rng).unwrap();

        assert_eq!(questions.len(), 2);
        let first = &questions[0];
        assert_eq!(first.id, "q1");
        assert_eq!(first.difficulty, Difficulty::Hard);
        assert_eq!(
            first.question,
            "Which \"Portal\" character says 'The cake is a lie'?"
        );
        assert_eq!(first.options.len(), 4);
        assert_eq!(first.correct_option(), Some("Doug Rattmann"));

        let second = &questions[1];
        assert_eq!(second.id, "q2");
        assert_eq!(second.category, "Science & Nature");
        assert_eq!(second.correct_option(), Some("W"));
    }

    #[test]
    fn correct_index_survives_any_shuffle() {
        for seed in 0..32 {
            let parsed: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = into_questions(parsed, &request(10), &mut rng).unwrap();
            for q in &questions {
                assert!(q.correct_index < q.options.len());
            }
            assert_eq!(questions[1].options[questions[1].correct_index], "W");
        }
    }

    #[test]
    fn keeps_at_most_requested_amount() {
        let parsed: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        let questions = into_questions(parsed, &request(1), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q1");
    }

    #[test]
    fn non_zero_response_code_is_an_error() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"response_code": 5, "results": []}"#).unwrap();
        let err = into_questions(parsed, &request(10), &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, FetchError::Api(5)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn empty_results_is_an_error() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"response_code": 0}"#).unwrap();
        let err = into_questions(parsed, &request(10), &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, FetchError::Empty));
    }

    #[test]
    fn unknown_difficulty_falls_back_to_requested() {
        let body = r#"{"response_code":0,"results":[{"category":"c","difficulty":"extreme",
            "question":"q","correct_answer":"a","incorrect_answers":["b"]}]}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        let questions = into_questions(parsed, &request(10), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(questions[0].difficulty, Difficulty::Hard);
        assert_eq!(questions[0].options.len(), 2);
    }
}

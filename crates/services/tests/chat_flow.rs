mod common;

use std::sync::Arc;

use common::{FakeApi, Reply};
use credit_core::completion::{LexicalCompletionPolicy, TurnVerdict};
use credit_core::model::ChatRole;
use services::prompts::{FALLBACK_ASSESSMENT_PROMPT, OPENING_QUESTION};
use services::{ChatController, ChatEntry, ChatError};

const FOLLOW_UP: &str = "Thanks. Can you tell me the annual capture volume?";
const DEFLECTION: &str = "I recommend consulting a tax professional for further details.";

fn controller(api: &Arc<FakeApi>) -> ChatController {
    ChatController::with_template(
        Arc::clone(api) as Arc<dyn services::AssessmentApi>,
        Arc::new(LexicalCompletionPolicy::default()),
        "TEMPLATE",
    )
}

async fn chat_three_turns(chat: &mut ChatController) {
    for message in ["A cement plant", "Texas", "Placed in service 2023"] {
        let reply = chat.send(message).await.unwrap();
        assert_eq!(reply.verdict, TurnVerdict::Continue);
    }
    assert_eq!(chat.transcript().len(), 7);
}

#[tokio::test]
async fn opening_turn_seeds_transcript() {
    let api = Arc::new(FakeApi::new());
    let chat = controller(&api);
    assert_eq!(chat.transcript().len(), 1);
    let opening = &chat.transcript().turns()[0];
    assert_eq!(opening.role(), ChatRole::Assistant);
    assert_eq!(opening.content(), OPENING_QUESTION);
    assert!(!chat.is_complete());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn short_transcripts_never_force_final() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::answer(DEFLECTION),
        Reply::answer(DEFLECTION),
        Reply::answer("Noted."),
    ]));
    let mut chat = controller(&api);

    chat_three_turns(&mut chat).await;

    assert_eq!(api.count("/ask-question"), 3);
    assert!(!chat.is_complete());
}

#[tokio::test]
async fn follow_up_question_keeps_interview_open() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer("Could you confirm your facility's placement-in-service date?"),
    ]));
    let mut chat = controller(&api);
    chat_three_turns(&mut chat).await;

    let reply = chat.send("150,000 tonnes a year").await.unwrap();

    assert_eq!(chat.transcript().len(), 9);
    assert_eq!(reply.verdict, TurnVerdict::Continue);
    assert!(reply.final_assessment.is_none());
    assert_eq!(api.count("/ask-question"), 4);
    assert!(!chat.is_complete());
}

#[tokio::test]
async fn deflection_forces_exactly_one_final_report() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer(DEFLECTION),
        Reply::answer("**ELIGIBILITY DETERMINATION**\n• YES"),
        Reply::answer(DEFLECTION),
    ]));
    let mut chat = controller(&api);
    chat_three_turns(&mut chat).await;

    let reply = chat.send("150,000 tonnes a year").await.unwrap();
    assert_eq!(reply.verdict, TurnVerdict::ForceFinal);
    assert_eq!(
        reply.final_assessment.as_deref(),
        Some("**ELIGIBILITY DETERMINATION**\n• YES")
    );
    assert!(chat.is_complete());
    assert_eq!(api.count("/ask-question"), 5);

    let asked = api.asked_questions();
    let forced = asked.last().unwrap();
    assert!(forced.starts_with("STOP ASKING QUESTIONS."));
    assert!(forced.contains("Information provided:\nassistant: I'm helping you"));
    assert!(forced.contains(&format!("assistant: {DEFLECTION}")));

    // The same deflection again does not issue another final request.
    let again = chat.send("Anything else?").await.unwrap();
    assert_eq!(again.verdict, TurnVerdict::ForceFinal);
    assert!(again.final_assessment.is_none());
    assert!(chat.is_complete());
    assert_eq!(api.count("/ask-question"), 6);
}

#[tokio::test]
async fn structured_report_is_not_forced_again() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer(FOLLOW_UP),
        Reply::answer("**Eligibility Determination**\n• Yes\n**Next Steps**\n• File Form 8933"),
    ]));
    let mut chat = controller(&api);
    chat_three_turns(&mut chat).await;

    let reply = chat.send("That's all").await.unwrap();
    assert_eq!(reply.verdict, TurnVerdict::Continue);
    assert_eq!(api.count("/ask-question"), 4);
    assert!(!chat.is_complete());
}

#[tokio::test]
async fn blank_message_is_ignored_without_request() {
    let api = Arc::new(FakeApi::new());
    let mut chat = controller(&api);

    let err = chat.send("   \n\t").await.unwrap_err();

    assert!(matches!(err, ChatError::EmptyMessage));
    assert!(api.calls().is_empty());
    assert_eq!(chat.transcript().len(), 1);
    assert_eq!(chat.entries().len(), 1);
}

#[tokio::test]
async fn failed_turn_is_shown_inline_but_kept_out_of_transcript() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::ServerError(500, "LLM unavailable"),
        Reply::answer(FOLLOW_UP),
    ]));
    let mut chat = controller(&api);

    let err = chat.send("A cement plant").await.unwrap_err();
    assert!(matches!(err, ChatError::Api(_)));
    assert_eq!(chat.transcript().len(), 2);
    assert_eq!(chat.transcript().last().unwrap().role(), ChatRole::User);
    match chat.entries().last() {
        Some(ChatEntry::Error(message)) => assert!(message.contains("LLM unavailable")),
        other => panic!("expected inline error, got {other:?}"),
    }
    assert!(!chat.transcript().render().contains("LLM unavailable"));

    chat.send("Still there?").await.unwrap();
    assert_eq!(chat.transcript().len(), 4);
    assert_eq!(api.count("/ask-question"), 2);
}

#[tokio::test]
async fn manual_request_is_not_guarded() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::answer("Report one"),
        Reply::answer("Report two"),
    ]));
    let mut chat = controller(&api);

    assert_eq!(chat.request_complete_assessment().await.unwrap(), "Report one");
    assert!(chat.is_complete());
    assert_eq!(chat.request_complete_assessment().await.unwrap(), "Report two");

    assert_eq!(api.count("/ask-question"), 2);
    for prompt in api.asked_questions() {
        assert!(prompt.contains("Information provided so far:"));
        assert!(prompt.contains("ADDITIONAL INFORMATION NEEDED"));
    }
    assert_eq!(chat.transcript().last().unwrap().content(), "Report two");
}

#[tokio::test]
async fn failed_manual_request_is_shown_inline() {
    let api = Arc::new(FakeApi::with_replies([
        Reply::ServerError(503, "LLM unavailable"),
        Reply::answer("Report"),
    ]));
    let mut chat = controller(&api);

    let err = chat.request_complete_assessment().await.unwrap_err();
    assert!(matches!(err, ChatError::Api(_)));
    assert!(!chat.is_complete());
    match chat.entries().last() {
        Some(ChatEntry::Error(message)) => assert!(message.contains("LLM unavailable")),
        other => panic!("expected inline error, got {other:?}"),
    }
    assert_eq!(chat.transcript().len(), 1);

    assert_eq!(chat.request_complete_assessment().await.unwrap(), "Report");
    assert!(chat.is_complete());
}

#[tokio::test]
async fn prompt_template_falls_back_when_unavailable() {
    let api = Arc::new(FakeApi::with_replies([Reply::answer(FOLLOW_UP)]));
    let mut chat = ChatController::start_default(Arc::clone(&api) as Arc<dyn services::AssessmentApi>).await;
    assert_eq!(chat.prompt_template(), FALLBACK_ASSESSMENT_PROMPT);

    chat.send("A cement plant").await.unwrap();
    let asked = api.asked_questions();
    assert!(asked[0].starts_with(FALLBACK_ASSESSMENT_PROMPT));
    assert_eq!(api.calls(), vec!["/assessment-prompt", "/ask-question"]);
}

#[tokio::test]
async fn server_prompt_template_is_used() {
    let api = Arc::new(FakeApi::with_replies([Reply::answer(FOLLOW_UP)]));
    *api.prompt.lock().unwrap() = Some("You assess 45Q.".to_owned());
    let mut chat = ChatController::start_default(Arc::clone(&api) as Arc<dyn services::AssessmentApi>).await;

    chat.send("A cement plant").await.unwrap();
    assert!(api.asked_questions()[0].starts_with("You assess 45Q.\n\n"));
}

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{
    AskView, AssessmentView, DocumentsView, ForecastView, InterviewView, QuestionnaireView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", AssessmentView)] Assessment {},
        #[route("/questionnaire", QuestionnaireView)] Questionnaire {},
        #[route("/interview", InterviewView)] Interview {},
        #[route("/forecast", ForecastView)] Forecast {},
        #[route("/ask", AskView)] Ask {},
        #[route("/documents", DocumentsView)] Documents {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let session_id = ctx.session_id();

    rsx! {
        nav { class: "sidebar",
            h1 { "45Q Credits" }
            ul {
                li { Link { to: Route::Assessment {}, "Step-by-step" } }
                li { Link { to: Route::Questionnaire {}, "Full questionnaire" } }
                li { Link { to: Route::Interview {}, "AI interview" } }
                li { Link { to: Route::Forecast {}, "Credit forecast" } }
                li { Link { to: Route::Ask {}, "Ask a question" } }
                li { Link { to: Route::Documents {}, "Documents" } }
            }
            div { class: "sidebar-meta",
                p { "Session: {session_id}" }
                p { "Backend: {ctx.api_base_url()}" }
            }
        }
    }
}

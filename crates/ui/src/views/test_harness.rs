use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::QuizLength;
use quiz_core::time::fixed_now;
use remote::{InMemoryQuizApi, QuizApi};
use services::{Clock, QuizLoopService, StatsService};

use crate::app::{FlowTestHandles, QuizShell};
use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::vm::{QuizIntent, QuizVm};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

#[derive(Props, Clone)]
struct ShellHarnessProps {
    app: Arc<TestApp>,
    flow: FlowTestHandles,
    quiz: QuizTestHandles,
}

impl PartialEq for ShellHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ShellHarnessProps {}

#[component]
fn ShellHarness(props: ShellHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.flow.clone());
    use_context_provider(|| props.quiz.clone());
    rsx! { QuizShell {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryQuizApi,
    flow: FlowTestHandles,
    quiz: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let resources and spawned tasks run until the tree is quiet.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Keep driving the tree until `span` has passed on the tokio clock.
    /// With a paused clock this jumps straight to each pending timer.
    pub async fn run_for(&mut self, span: std::time::Duration) {
        let start = tokio::time::Instant::now();
        while start.elapsed() < span {
            self.drive_async().await;
        }
        self.settle().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub async fn start_quiz(&mut self, length: QuizLength) {
        let mut flow = self.flow.flow();
        self.dom.in_runtime(|| flow.write().start(length));
        self.settle().await;
    }

    pub async fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.quiz.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle().await;
    }

    pub fn with_quiz<R>(&self, f: impl FnOnce(&QuizVm) -> R) -> Option<R> {
        let vm = self.quiz.vm();
        self.dom.in_runtime(|| vm.read().as_ref().map(f))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(api: InMemoryQuizApi) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let shared: Arc<dyn QuizApi> = Arc::new(api.clone());
    let app = Arc::new(TestApp {
        quiz_loop: Arc::new(QuizLoopService::new(clock, Arc::clone(&shared))),
        stats: Arc::new(StatsService::new(shared)),
    });

    let flow = FlowTestHandles::default();
    let quiz = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellHarnessProps {
            app,
            flow: flow.clone(),
            quiz: quiz.clone(),
        },
    );

    ViewHarness {
        dom,
        api,
        flow,
        quiz,
    }
}

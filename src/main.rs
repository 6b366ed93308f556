use canvas_utils::{
    app_state::AppState,
    config::Config,
    errors::AppResult,
    models::{domain::CanvasId, dto::request::CreateQuizRequest},
    services::QuestionOptions,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let course_id = match std::env::args().nth(1).map(|arg| arg.parse::<CanvasId>()) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            eprintln!("usage: canvas-utils [course_id]");
            std::process::exit(2);
        }
        None => None,
    };

    if let Err(err) = run(course_id).await {
        log::error!("[{}] {}", err.error_code(), err);
        std::process::exit(1);
    }
}

async fn run(course_id: Option<CanvasId>) -> AppResult<()> {
    let section = std::env::var("CANVAS_CONFIG_SECTION").ok();
    let config = Config::load(section.as_deref())?;
    println!("Using Canvas at {}", config.base_url);

    let state = AppState::new(config)?;

    for course in state.course_service.list_courses().await? {
        println!("{}", course);
    }

    let Some(course_id) = course_id else {
        return Ok(());
    };

    if let Some(root) = state.file_service.get_course_folder(course_id).await? {
        println!("{}", root.full_name);
    }
    for folder in state.file_service.list_folders(course_id).await? {
        println!("{}", folder);
    }

    for enrollment in state
        .course_service
        .list_student_enrollments(course_id)
        .await?
    {
        println!("{}   ({})", enrollment.user.sortable_name, enrollment.user.id);
    }

    for module in state.course_service.list_modules(course_id).await? {
        println!("{}", module);
    }

    let (quiz, mut session) = state
        .quiz_service
        .create_quiz_session(course_id, CreateQuizRequest::new("New quiz"))
        .await?;
    let question = session
        .new_true_false_question("title", "text", "correct", "wrong", QuestionOptions::new())
        .await?;
    println!("Created question {} in quiz {}", question.id, quiz);

    for quiz in state.quiz_service.list_quizzes(course_id).await? {
        println!("{}", quiz);
    }

    Ok(())
}

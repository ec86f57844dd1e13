use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workout_planner_core::contract::GenerationParameters;
use workout_planner_core::generation::{build_invoke_body, extract_generated_text};
use workout_planner_lambda::adapters::exercise_catalog::RapidApiExerciseCatalog;
use workout_planner_lambda::adapters::plan_model::{ModelError, PlanModel};
use workout_planner_lambda::config::{ModelSettings, WorkoutPlannerConfig};
use workout_planner_lambda::handlers::response::ApiGatewayResponse;
use workout_planner_lambda::handlers::workout::handle_workout_event;

struct BedrockPlanModel {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    parameters: GenerationParameters,
}

impl BedrockPlanModel {
    /// Credentials resolve lazily on the first invocation, so a missing
    /// identity surfaces there as an invocation error.
    fn new(sdk_config: &SdkConfig, settings: ModelSettings) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(sdk_config),
            model_id: settings.model_id,
            parameters: settings.parameters,
        }
    }
}

impl PlanModel for BedrockPlanModel {
    fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let body = build_invoke_body(prompt, &self.parameters)?;
        let client = self.client.clone();
        let model_id = self.model_id.clone();

        let response_body = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .invoke_model()
                    .model_id(model_id)
                    .content_type("application/json")
                    .accept("application/json")
                    .body(Blob::new(body))
                    .send()
                    .await
                    .map(|output| output.body().as_ref().to_vec())
                    .map_err(|error| {
                        ModelError::Invocation(format!(
                            "failed to invoke model: {}",
                            DisplayErrorContext(&error)
                        ))
                    })
            })
        })?;

        Ok(extract_generated_text(&response_body)?)
    }
}

struct RuntimeDependencies {
    catalog: RapidApiExerciseCatalog,
    model: BedrockPlanModel,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_workout_event(event.payload, &deps.catalog, &deps.model))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_current_span(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let WorkoutPlannerConfig { catalog, model } = WorkoutPlannerConfig::from_env()
        .map_err(|error| Error::from(format!("invalid configuration: {error}")))?;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(model.region.clone()))
        .load()
        .await;
    info!(
        component = "workout_lambda",
        region = %model.region,
        model_id = %model.model_id,
        "cold start"
    );

    let deps = RuntimeDependencies {
        catalog: RapidApiExerciseCatalog::new(catalog)
            .map_err(|error| Error::from(format!("invalid exercise catalog settings: {error}")))?,
        model: BedrockPlanModel::new(&sdk_config, model),
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}

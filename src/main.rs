use std::{io::Write, process, sync::Arc};

use roster::{
    application::{
        countries::{CountriesService, CountryAddRequest},
        error::{AppError, ErrorReport},
        persons::{PersonAddRequest, PersonUpdateRequest},
        repos::{CountriesRepo, PersonsRepo},
        services::ApplicationServices,
    },
    cache::{CacheConfig, MemoryCache},
    config::{
        self, CountriesCommand, PersonFieldArgs, PersonListArgs, PersonsCommand, Settings,
    },
    domain::clock::SystemClock,
    infra::{db::PostgresRepositories, error::InfraError, telemetry},
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let report = ErrorReport::from_error("main", error);
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?report.messages, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?report.messages, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let repositories = init_repositories(&settings).await?;

    match cli_args.command {
        config::Command::Migrate => {
            info!("Database schema is up to date");
            Ok(())
        }
        config::Command::Countries(args) => {
            let services = build_services(repositories, &settings);
            run_countries(&services, args.command).await
        }
        config::Command::Persons(args) => {
            let services = build_services(repositories, &settings);
            run_persons(&services, args.command).await
        }
    }
}

async fn init_repositories(settings: &Settings) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_services(
    repositories: Arc<PostgresRepositories>,
    settings: &Settings,
) -> ApplicationServices {
    let countries_repo: Arc<dyn CountriesRepo> = repositories.clone();
    let persons_repo: Arc<dyn PersonsRepo> = repositories;

    ApplicationServices::new(
        countries_repo,
        persons_repo,
        Arc::new(MemoryCache::new()),
        &CacheConfig::from(&settings.cache),
        Arc::new(SystemClock),
    )
}

async fn run_countries(
    services: &ApplicationServices,
    command: CountriesCommand,
) -> Result<(), AppError> {
    let countries = &services.countries;
    match command {
        CountriesCommand::Add { name } => {
            let added = countries
                .add_country(Some(CountryAddRequest::named(name)))
                .await?;
            print_json(&added)
        }
        CountriesCommand::List => print_json(&countries.get_all_countries().await?),
        CountriesCommand::Get { id } => print_json(&countries.get_country(Some(id)).await?),
        CountriesCommand::Import { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .map_err(InfraError::from)?;
            let names = contents.lines().map(str::to_string).collect();
            let added = countries.import_countries(names).await?;
            info!(file = %file.display(), added, "Import finished");
            print_json(&serde_json::json!({ "added": added }))
        }
    }
}

async fn run_persons(
    services: &ApplicationServices,
    command: PersonsCommand,
) -> Result<(), AppError> {
    let persons = &services.persons;
    match command {
        PersonsCommand::Add(fields) => {
            let added = persons.add_person(Some(add_request(fields))).await?;
            print_json(&added)
        }
        PersonsCommand::List(PersonListArgs {
            search_by,
            query,
            sort_by,
            order,
        }) => {
            let filtered = persons
                .get_filtered_persons(search_by, query.as_deref())
                .await?;
            print_json(&persons.get_sorted_persons(filtered, sort_by, order))
        }
        PersonsCommand::Get { id } => print_json(&persons.get_person(Some(id)).await?),
        PersonsCommand::Update { id, fields } => {
            let current = persons
                .get_person(Some(id))
                .await?
                .ok_or(AppError::InvalidReference {
                    entity: "person",
                    id,
                })?;
            let request = merge_update(current.to_update_request(), fields);
            print_json(&persons.update_person(Some(request)).await?)
        }
        PersonsCommand::Delete { id } => {
            let deleted = persons.delete_person(Some(id)).await?;
            print_json(&serde_json::json!({ "id": id, "deleted": deleted }))
        }
    }
}

fn add_request(fields: PersonFieldArgs) -> PersonAddRequest {
    PersonAddRequest {
        name: fields.name,
        email: fields.email,
        date_of_birth: fields.date_of_birth,
        gender: fields.gender,
        country_id: fields.country_id,
        address: fields.address,
        receive_newsletters: fields.receive_newsletters.unwrap_or(false),
    }
}

fn merge_update(mut request: PersonUpdateRequest, fields: PersonFieldArgs) -> PersonUpdateRequest {
    request.name = fields.name.or(request.name);
    request.email = fields.email.or(request.email);
    request.date_of_birth = fields.date_of_birth.or(request.date_of_birth);
    request.gender = fields.gender.or(request.gender);
    request.country_id = fields.country_id.or(request.country_id);
    request.address = fields.address.or(request.address);
    request.receive_newsletters = fields
        .receive_newsletters
        .unwrap_or(request.receive_newsletters);
    request
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(InfraError::from)?;
    writeln!(stdout).map_err(InfraError::from)?;
    Ok(())
}

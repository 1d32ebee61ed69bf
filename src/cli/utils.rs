use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;

use crate::api::Resource;
use crate::cli::context::ShellContext;
use crate::cli::OutputFormat;
use crate::models::{ref_name, EmployeeRef};
use crate::screen::{QueryState, ResourceController, Searchable, Status};

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: []
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn an error state into the command's failure, with a retry hint
pub fn ensure_loaded<T>(state: &QueryState<T>, output_format: &OutputFormat) -> anyhow::Result<()> {
    if state.status == Status::Error {
        let message = state.error_message.as_deref().unwrap_or("Request failed");
        output_error(output_format, message, Some("FETCH_FAILED"))?;
        anyhow::bail!("{} (run the command again to reload)", message);
    }
    Ok(())
}

/// Load a list resource, apply the search box and render the rows
pub async fn show_list<I, F>(
    ctx: &ShellContext,
    resource: Resource,
    collection_name: &str,
    search: Option<&str>,
    output_format: &OutputFormat,
    render: F,
) -> anyhow::Result<()>
where
    I: DeserializeOwned + Serialize + Searchable + Clone + Send + 'static,
    F: Fn(&[I]),
{
    let controller: ResourceController<Vec<I>> = ctx.controller(resource);
    controller.load().await;
    render_list(&controller, collection_name, search, output_format, render)
}

pub fn render_list<I, F>(
    controller: &ResourceController<Vec<I>>,
    collection_name: &str,
    search: Option<&str>,
    output_format: &OutputFormat,
    render: F,
) -> anyhow::Result<()>
where
    I: DeserializeOwned + Serialize + Searchable + Clone + Send + 'static,
    F: Fn(&[I]),
{
    let state = controller.state();
    ensure_loaded(&state, output_format)?;

    let items = controller.search(search.unwrap_or(""));
    if state.status == Status::Empty || items.is_empty() {
        let message = match search {
            Some(query) if state.status != Status::Empty => format!("No {} match '{}'", collection_name, query),
            _ => format!("No {} found", collection_name),
        };
        return output_empty_collection(output_format, collection_name, &message);
    }

    match output_format {
        OutputFormat::Json => output_json(&json!({ collection_name: items })),
        OutputFormat::Text => {
            render(&items);
            Ok(())
        }
    }
}

/// Load a single record and render it
pub async fn show_detail<T, F>(ctx: &ShellContext, resource: Resource, output_format: &OutputFormat, render: F) -> anyhow::Result<()>
where
    T: DeserializeOwned + Serialize + Clone + Send + 'static,
    F: Fn(&T),
{
    let controller: ResourceController<T> = ctx.controller(resource);
    controller.load().await;
    let state = controller.state();
    ensure_loaded(&state, output_format)?;

    let Some(record) = state.data else {
        anyhow::bail!("No data returned");
    };

    match output_format {
        OutputFormat::Json => output_json(&record),
        OutputFormat::Text => {
            render(&record);
            Ok(())
        }
    }
}

/// Ask a question on the terminal and return the trimmed answer
pub fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{}", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}

/// Name of an embedded employee reference
pub fn employee_name(employee: &Option<EmployeeRef>) -> &str {
    or_na(ref_name(employee))
}

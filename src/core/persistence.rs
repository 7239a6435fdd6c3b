use crate::core::api::{ons, zns, Api};
use crate::core::naming::zuora_camelize;
use crate::core::response::{QueryResult, SaveResult};
use crate::domain::model::{value_text, Attributes, Value};
use crate::domain::ports::Transport;
use crate::domain::record::ZObject;
use crate::utils::error::{Result, ZuoraError};
use crate::utils::xml::XmlBuilder;

fn escape_zoql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// ZOQL selecting every declared field of `O` for one id.
pub fn find_query<O: ZObject>(id: &str) -> String {
    let schema = O::schema();
    let columns: Vec<String> = std::iter::once("Id".to_string())
        .chain(schema.fields.iter().map(|f| zuora_camelize(f)))
        .collect();
    format!(
        "select {} from {} where Id = '{}'",
        columns.join(", "),
        schema.name,
        escape_zoql(id)
    )
}

/// Maps one query record back onto a clean, persisted object.
fn hydrate<O: ZObject>(record: Vec<(String, String)>) -> Result<O> {
    let schema = O::schema();
    let mut id = None;
    let mut attributes = Attributes::new();

    for (element, text) in record {
        if element == "Id" {
            id = Some(text);
            continue;
        }
        if let Some(field) = schema.fields.iter().find(|f| zuora_camelize(f) == element) {
            attributes.insert(field.to_string(), Value::String(text));
        }
    }

    let id = id.ok_or_else(|| ZuoraError::response(format!("{} record has no Id", schema.name)))?;
    Ok(O::load(id, attributes))
}

/// Loads an existing object by id through the `query` operation.
pub async fn find<O: ZObject, T: Transport>(api: &Api<T>, id: &str) -> Result<O> {
    let query = find_query::<O>(id);
    tracing::debug!("Finding {} '{}'", O::schema().name, id);

    let response = api
        .request("query", |xml| xml.element(&zns("queryString"), &query))
        .await?;
    let result = QueryResult::from_response(&response)?;

    let record = result
        .records
        .into_iter()
        .next()
        .ok_or_else(|| ZuoraError::NotFoundError {
            object: O::schema().name.to_string(),
            id: id.to_string(),
        })?;
    hydrate(record)
}

fn write_z_object<F>(xml: &mut XmlBuilder, object_name: &str, fields: F) -> Result<()>
where
    F: FnOnce(&mut XmlBuilder) -> Result<()>,
{
    let type_name = format!("ns2:{}", object_name);
    xml.start(&zns("zObjects"), &[("xsi:type", type_name.as_str())])?;
    fields(xml)?;
    xml.end(&zns("zObjects"))
}

/// Sends a new object through `create`. On success the record takes the
/// returned id and its changes are cleared; rejections stay in the result.
pub async fn create<O: ZObject, T: Transport>(api: &Api<T>, record: &mut O) -> Result<SaveResult> {
    let schema = O::schema();
    let fields: Vec<(&'static str, String)> = record
        .to_fields()
        .into_iter()
        .filter(|(f, _)| !schema.is_read_only(f))
        .filter_map(|(f, v)| value_text(v).map(|text| (f, text)))
        .collect();

    let response = api
        .request("create", |xml| {
            write_z_object(xml, schema.name, |z| {
                for (field, text) in &fields {
                    z.element(&ons(&zuora_camelize(field)), text)?;
                }
                Ok(())
            })
        })
        .await?;

    let result = SaveResult::from_response(&response)?;
    if result.success {
        if let Some(id) = &result.id {
            record.set_id(id.as_str());
        }
        record.clear_changed_attributes();
        tracing::info!("✅ Created {} {:?}", schema.name, result.id);
    } else {
        tracing::warn!("{} create rejected: {:?}", schema.name, result.errors);
    }
    Ok(result)
}

/// Sends the id and pending changes of a persisted object through `update`.
/// Changed fields that are now null go out as `fieldsToNull`.
pub async fn update<O: ZObject, T: Transport>(api: &Api<T>, record: &mut O) -> Result<SaveResult> {
    let schema = O::schema();
    let id = record
        .id()
        .ok_or_else(|| ZuoraError::IncompleteRequestError {
            field: "id".to_string(),
        })?
        .to_string();

    let pending = record.changed_fields();
    let mut changed = Vec::new();
    let mut nulled = Vec::new();
    for field in schema.writable_fields() {
        if !pending.contains(&field) {
            continue;
        }
        match record.get(field).and_then(value_text) {
            Some(text) => changed.push((field, text)),
            None => nulled.push(field),
        }
    }

    let response = api
        .request("update", |xml| {
            write_z_object(xml, schema.name, |z| {
                for field in &nulled {
                    z.element(&ons("fieldsToNull"), &zuora_camelize(field))?;
                }
                z.element(&ons("Id"), &id)?;
                for (field, text) in &changed {
                    z.element(&ons(&zuora_camelize(field)), text)?;
                }
                Ok(())
            })
        })
        .await?;

    let result = SaveResult::from_response(&response)?;
    if result.success {
        record.clear_changed_attributes();
    }
    Ok(result)
}

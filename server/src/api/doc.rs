use utoipa::OpenApi;

pub const CITY_TAG: &str = "City";
pub const EVENT_TAG: &str = "Event";
pub const INFO_TAG: &str = "Info";
pub const POST_TAG: &str = "Post";
pub const USER_TAG: &str = "User";

#[derive(OpenApi)]
#[openapi(
    info(title = "Event Management API"),
    tags(
        (name = CITY_TAG, description = "City API endpoints"),
        (name = EVENT_TAG, description = "Event API endpoints"),
        (name = INFO_TAG, description = "Info API endpoints"),
        (name = POST_TAG, description = "Post API endpoints"),
        (name = USER_TAG, description = "User API endpoints"),
        (name = "Basic-Requests", description = BASIC_REQUESTS_DESCRIPTION),
        (name = "Errors", description = ERROR_DESCRIPTION),
    )
)]
pub struct ApiDoc;

const BASIC_REQUESTS_DESCRIPTION: &str = r#"
Requests with a body must use `Content-Type: application/json`. Every response
is JSON.

Create requests only check that required fields are present. A field counts as
missing when it is absent, `null`, an empty string or an id of `0`. Update
requests replace every mutable field of the resource; optional fields left out
of an update are cleared. Updates and deletions of ids that don't exist
succeed without changing anything.
"#;

const ERROR_DESCRIPTION: &str = r#"
Every error response has the form

```json5
{
    "error": <message>
}
```

| Status | Meaning |
| ------ | ------- |
| 400    | A required field is missing, or the request body or path is malformed |
| 404    | No resource has the requested id, or no endpoint matches the request |
| 415    | The request body is not JSON |
| 422    | The request body has fields of the wrong type |
| 500    | The database is unreachable or rejected the statement; the message is the database's |
"#;

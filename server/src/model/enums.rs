use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ResourceType {
    City,
    Event,
    Post,
    User,
}

impl ResourceType {
    /// Message returned when a create request for this resource is missing a required field.
    pub fn missing_fields_message(self) -> &'static str {
        match self {
            Self::City => "ID and city name are required",
            Self::Event => "All fields except rating_id are required",
            Self::Post => "Title, body, and user_id are required",
            Self::User => "Name and privilege are required",
        }
    }
}

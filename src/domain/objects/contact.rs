use crate::domain::record::{zobject, ObjectSchema};
use crate::domain::rules::FieldRule;
use once_cell::sync::Lazy;

const PHONE_TYPES: &[&str] = &["Work", "Mobile", "Home", "Other"];

pub(crate) static CONTACT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| ObjectSchema {
    name: "Contact",
    fields: &[
        "account_id",
        "address1",
        "address2",
        "city",
        "country",
        "county",
        "description",
        "fax",
        "first_name",
        "home_phone",
        "last_name",
        "mobile_phone",
        "nick_name",
        "other_phone",
        "other_phone_type",
        "personal_email",
        "postal_code",
        "state",
        "tax_region",
        "work_email",
        "work_phone",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    read_only: &["created_by_id", "created_date", "updated_by_id", "updated_date"],
    defaults: Vec::new(),
    rules: vec![
        FieldRule::presence("first_name"),
        FieldRule::presence("last_name"),
        FieldRule::length("first_name", 100),
        FieldRule::length("last_name", 100),
        FieldRule::length("nick_name", 100),
        FieldRule::length("address1", 255),
        FieldRule::length("address2", 255),
        FieldRule::length("city", 40),
        FieldRule::length("country", 64),
        FieldRule::length("county", 32),
        FieldRule::length("state", 40),
        FieldRule::length("postal_code", 20),
        FieldRule::length("tax_region", 32),
        FieldRule::length("description", 100),
        FieldRule::length("fax", 40),
        FieldRule::length("home_phone", 40),
        FieldRule::length("mobile_phone", 40),
        FieldRule::length("other_phone", 40),
        FieldRule::length("work_phone", 40),
        FieldRule::length("personal_email", 80),
        FieldRule::length("work_email", 80),
        FieldRule::inclusion("other_phone_type", PHONE_TYPES).allow_nil(),
        FieldRule::datetime("created_date").allow_nil(),
        FieldRule::datetime("updated_date").allow_nil(),
    ],
});

zobject!(
    /// A person attached to an account, used as bill-to or sold-to.
    Contact,
    CONTACT_SCHEMA
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ZObject;

    #[test]
    fn test_names_are_required() {
        let contact = Contact::new();
        let errors = contact.validate();
        assert_eq!(errors.on("first_name"), ["can't be blank"]);
        assert_eq!(errors.on("last_name"), ["can't be blank"]);

        let contact = contact
            .with("first_name", "John")
            .and_then(|c| c.with("last_name", "Doe"))
            .unwrap();
        assert!(contact.is_valid());
    }
}

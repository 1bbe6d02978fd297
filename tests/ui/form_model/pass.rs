use contact_form::form::{FieldLens, FormModel};

#[derive(Clone, contact_form::form::FormModel)]
struct FeedbackForm {
    reply_to: String,
    rating: u8,
}

fn main() {
    let fields = FeedbackForm::fields();
    let mut model = FeedbackForm {
        reply_to: "a@b.com".to_string(),
        rating: 3,
    };
    fields.reply_to().set(&mut model, "c@d.com".to_string());
    fields.rating().set(&mut model, 5);

    assert_eq!(fields.reply_to().key().as_str(), "reply_to");
    assert_eq!(fields.reply_to().get(&model), "c@d.com");
    assert_eq!(*fields.rating().get(&model), 5);
    assert_eq!(
        FeedbackForm::field_keys()
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>(),
        vec!["reply_to", "rating"]
    );
}

//! Checkout form surfaces.
//!
//! Unlike click surfaces (which go through injected callbacks), forms
//! publish their own field-edit topics: the field set is the form's
//! identity, so the composer gains nothing from renaming the events.

use std::rc::Rc;

use larek_core::{ContactField, DeliveryField, PaymentMethod};

use super::{attach_child, ElementRef, View};
use crate::events::{EventBus, Payload, Topic};

const ACTIVE_PAYMENT_CLASS: &str = "button_alt-active";

/// Shared form chrome: error line and submit button.
struct FormChrome {
    container: ElementRef,
    errors: ElementRef,
    submit: ElementRef,
}

impl FormChrome {
    fn new(container: ElementRef) -> Self {
        let errors = attach_child(&container, "form__errors");
        let submit = attach_child(&container, "form__submit");
        // Nothing is valid until the first validation pass says so
        submit.borrow_mut().set_disabled(true);
        Self {
            container,
            errors,
            submit,
        }
    }

    fn set_valid(&self, valid: bool) {
        self.submit.borrow_mut().set_disabled(!valid);
    }

    fn set_errors(&self, messages: &[String]) {
        self.errors.borrow_mut().set_text(messages.join("; "));
    }
}

/// Partial attribute patch for the [`DeliveryForm`].
#[derive(Default)]
pub struct DeliveryFormPatch {
    pub payment: Option<PaymentMethod>,
    pub address: Option<String>,
    pub valid: Option<bool>,
    pub errors: Option<Vec<String>>,
}

/// Step one of checkout: payment method toggle and delivery address.
pub struct DeliveryForm {
    chrome: FormChrome,
    online_button: ElementRef,
    cash_button: ElementRef,
    address: ElementRef,
}

impl DeliveryForm {
    /// Decorate `container` and wire its gestures onto `bus`.
    #[must_use]
    pub fn new(container: ElementRef, bus: &Rc<EventBus>) -> Self {
        let chrome = FormChrome::new(container);
        let online_button = attach_child(&chrome.container, "button_online");
        let cash_button = attach_child(&chrome.container, "button_cash");
        let address = attach_child(&chrome.container, "address");

        for (button, method) in [
            (&online_button, PaymentMethod::Online),
            (&cash_button, PaymentMethod::Cash),
        ] {
            let bus = Rc::clone(bus);
            button.borrow_mut().set_on_click(Rc::new(move || {
                bus.publish(Topic::PaymentToggle, Payload::Field(method.as_str().to_owned()))
            }));
        }

        {
            let bus = Rc::clone(bus);
            address.borrow_mut().set_on_input(Rc::new(move |value| {
                bus.publish(
                    Topic::DeliveryFieldChanged(DeliveryField::Address),
                    Payload::Field(value.to_owned()),
                )
            }));
        }

        {
            let bus = Rc::clone(bus);
            chrome
                .submit
                .borrow_mut()
                .set_on_click(Rc::new(move || {
                    bus.publish(Topic::CheckoutSubmit, Payload::None)
                }));
        }

        let form = Self {
            chrome,
            online_button,
            cash_button,
            address,
        };
        form.set_payment(PaymentMethod::default());
        form
    }

    fn set_payment(&self, method: PaymentMethod) {
        self.online_button
            .borrow_mut()
            .toggle_class(ACTIVE_PAYMENT_CLASS, method == PaymentMethod::Online);
        self.cash_button
            .borrow_mut()
            .toggle_class(ACTIVE_PAYMENT_CLASS, method == PaymentMethod::Cash);
    }
}

impl View for DeliveryForm {
    type Patch = DeliveryFormPatch;

    fn target(&self) -> &ElementRef {
        &self.chrome.container
    }

    fn apply(&mut self, patch: DeliveryFormPatch) {
        if let Some(method) = patch.payment {
            self.set_payment(method);
        }
        if let Some(address) = patch.address {
            self.address.borrow_mut().set_text(address);
        }
        if let Some(valid) = patch.valid {
            self.chrome.set_valid(valid);
        }
        if let Some(errors) = patch.errors {
            self.chrome.set_errors(&errors);
        }
    }
}

/// Partial attribute patch for the [`ContactForm`].
#[derive(Default)]
pub struct ContactFormPatch {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub valid: Option<bool>,
    pub errors: Option<Vec<String>>,
}

/// Step two of checkout: email and phone.
pub struct ContactForm {
    chrome: FormChrome,
    email: ElementRef,
    phone: ElementRef,
}

impl ContactForm {
    /// Decorate `container` and wire its gestures onto `bus`.
    #[must_use]
    pub fn new(container: ElementRef, bus: &Rc<EventBus>) -> Self {
        let chrome = FormChrome::new(container);
        let email = attach_child(&chrome.container, "email");
        let phone = attach_child(&chrome.container, "phone");

        for (input, field) in [(&email, ContactField::Email), (&phone, ContactField::Phone)] {
            let bus = Rc::clone(bus);
            input.borrow_mut().set_on_input(Rc::new(move |value| {
                bus.publish(
                    Topic::ContactFieldChanged(field),
                    Payload::Field(value.to_owned()),
                )
            }));
        }

        {
            let bus = Rc::clone(bus);
            chrome
                .submit
                .borrow_mut()
                .set_on_click(Rc::new(move || {
                    bus.publish(Topic::ContactsSubmit, Payload::None)
                }));
        }

        Self {
            chrome,
            email,
            phone,
        }
    }
}

impl View for ContactForm {
    type Patch = ContactFormPatch;

    fn target(&self) -> &ElementRef {
        &self.chrome.container
    }

    fn apply(&mut self, patch: ContactFormPatch) {
        if let Some(email) = patch.email {
            self.email.borrow_mut().set_text(email);
        }
        if let Some(phone) = patch.phone {
            self.phone.borrow_mut().set_text(phone);
        }
        if let Some(valid) = patch.valid {
            self.chrome.set_valid(valid);
        }
        if let Some(errors) = patch.errors {
            self.chrome.set_errors(&errors);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::super::{fire_click, fire_input, Element};
    use super::*;
    use crate::events::{Event, TopicFilter};

    fn topic_log(bus: &Rc<EventBus>) -> Rc<RefCell<Vec<(Topic, Payload)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for filter in [
            TopicFilter::AnyDeliveryField,
            TopicFilter::AnyContactField,
            TopicFilter::Exact(Topic::PaymentToggle),
            TopicFilter::Exact(Topic::CheckoutSubmit),
            TopicFilter::Exact(Topic::ContactsSubmit),
        ] {
            let log = Rc::clone(&log);
            bus.subscribe(filter, move |event: &Event| {
                log.borrow_mut()
                    .push((event.topic.clone(), event.payload.clone()));
                Ok(())
            });
        }
        log
    }

    #[test]
    fn test_address_edit_publishes_field_topic() {
        let bus = Rc::new(EventBus::new());
        let log = topic_log(&bus);
        let container = Element::shared("order-form");
        let _form = DeliveryForm::new(Rc::clone(&container), &bus);

        let address = container.borrow().find("address").unwrap();
        fire_input(&address, "ул. Пушкина, д.10").unwrap();

        let entries = log.borrow();
        assert_eq!(
            entries.as_slice(),
            [(
                Topic::DeliveryFieldChanged(DeliveryField::Address),
                Payload::Field("ул. Пушкина, д.10".to_owned())
            )]
        );
    }

    #[test]
    fn test_payment_buttons_publish_toggle() {
        let bus = Rc::new(EventBus::new());
        let log = topic_log(&bus);
        let container = Element::shared("order-form");
        let _form = DeliveryForm::new(Rc::clone(&container), &bus);

        let cash = container.borrow().find("button_cash").unwrap();
        fire_click(&cash).unwrap();

        let entries = log.borrow();
        assert_eq!(
            entries.as_slice(),
            [(Topic::PaymentToggle, Payload::Field("cash".to_owned()))]
        );
    }

    #[test]
    fn test_payment_toggle_classes() {
        let bus = Rc::new(EventBus::new());
        let container = Element::shared("order-form");
        let mut form = DeliveryForm::new(Rc::clone(&container), &bus);

        // Online is the default
        let online = container.borrow().find("button_online").unwrap();
        let cash = container.borrow().find("button_cash").unwrap();
        assert!(online.borrow().has_class(ACTIVE_PAYMENT_CLASS));
        assert!(!cash.borrow().has_class(ACTIVE_PAYMENT_CLASS));

        form.render(DeliveryFormPatch {
            payment: Some(PaymentMethod::Cash),
            ..DeliveryFormPatch::default()
        });
        assert!(!online.borrow().has_class(ACTIVE_PAYMENT_CLASS));
        assert!(cash.borrow().has_class(ACTIVE_PAYMENT_CLASS));
    }

    #[test]
    fn test_submit_gated_until_valid() {
        let bus = Rc::new(EventBus::new());
        let log = topic_log(&bus);
        let container = Element::shared("contacts-form");
        let mut form = ContactForm::new(Rc::clone(&container), &bus);

        let submit = container.borrow().find("form__submit").unwrap();
        fire_click(&submit).unwrap();
        assert!(log.borrow().is_empty());

        form.render(ContactFormPatch {
            valid: Some(true),
            ..ContactFormPatch::default()
        });
        fire_click(&submit).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            [(Topic::ContactsSubmit, Payload::None)]
        );
    }

    #[test]
    fn test_error_text_joined_and_cleared() {
        let bus = Rc::new(EventBus::new());
        let container = Element::shared("contacts-form");
        let mut form = ContactForm::new(Rc::clone(&container), &bus);

        form.render(ContactFormPatch {
            errors: Some(vec![
                "Email is required".to_owned(),
                "Phone number is required".to_owned(),
            ]),
            ..ContactFormPatch::default()
        });
        let errors = container.borrow().find("form__errors").unwrap();
        assert_eq!(
            errors.borrow().text(),
            "Email is required; Phone number is required"
        );

        form.render(ContactFormPatch {
            errors: Some(Vec::new()),
            ..ContactFormPatch::default()
        });
        assert_eq!(errors.borrow().text(), "");
    }
}

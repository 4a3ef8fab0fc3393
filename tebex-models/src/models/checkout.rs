//! Checkout API models
//!
//! Includes the payment and recurring-payment shapes that webhook subjects
//! carry.

use crate::registry::Registry;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

model_enum! {
    /// Whether a package is bought once or subscribed to
    pub enum PackageType as "Package.TypeEnum" {
        Single = "single",
        Subscription = "subscription",
    }
}

model_enum! {
    /// Unit of a subscription's expiry period
    pub enum PackageExpiryPeriod as "Package.ExpiryPeriodEnum" {
        Day = "day",
        Week = "week",
        Month = "month",
        Year = "year",
    }
}

model_enum! {
    pub enum AddPackageType as "AddPackageRequest.TypeEnum" {
        Single = "single",
        Subscription = "subscription",
    }
}

model_enum! {
    pub enum SaleDiscountType as "Sale.DiscountTypeEnum" {
        Percentage = "percentage",
        Amount = "amount",
    }
}

model_enum! {
    /// Target state when updating a recurring payment
    pub enum RecurringPaymentUpdateStatus as "UpdateRecurringPaymentRequest.StatusEnum" {
        Paused = "Paused",
        Active = "Active",
    }
}

model! {
    /// An amount with its currency
    pub struct PaymentSubjectPrice as "PaymentSubjectPrice" {
        amount: f64 => ("amount", "amount", "number"),
        currency: String => ("currency", "currency", "string"),
    }
}

model! {
    /// Status of a single payment
    pub struct PaymentStatus as "PaymentStatus" {
        id: i64 => ("id", "id", "number"),
        description: String => ("description", "description", "string"),
    }
}

model! {
    pub struct PaymentSubjectPaymentMethod as "PaymentSubjectPaymentMethod" {
        name: String => ("name", "name", "string"),
        refundable: bool => ("refundable", "refundable", "boolean"),
    }
}

model! {
    pub struct PaymentSubjectFees as "PaymentSubjectFees" {
        tax: PaymentSubjectPrice => ("tax", "tax", "PaymentSubjectPrice"),
        gateway: PaymentSubjectPrice => ("gateway", "gateway", "PaymentSubjectPrice"),
    }
}

model! {
    /// The game account a purchase was made for
    pub struct PaymentSubjectUsername as "PaymentSubjectUsername" {
        id: String => ("id", "id", "string"),
        username: String => ("username", "username", "string"),
    }
}

model! {
    pub struct PaymentSubjectCustomer as "PaymentSubjectCustomer" {
        first_name: String => ("first_name", "firstName", "string"),
        last_name: String => ("last_name", "lastName", "string"),
        email: String => ("email", "email", "string"),
        ip: String => ("ip", "ip", "string"),
        username: PaymentSubjectUsername => ("username", "username", "PaymentSubjectUsername"),
        marketing_consent: bool => ("marketing_consent", "marketingConsent", "boolean"),
        country: String => ("country", "country", "string"),
        postal_code: String => ("postal_code", "postalCode", "string | null"),
    }
}

model! {
    /// One purchased product within a payment
    pub struct PaymentSubjectProductsInner as "PaymentSubjectProductsInner" {
        id: i64 => ("id", "id", "number"),
        name: String => ("name", "name", "string"),
        quantity: i64 => ("quantity", "quantity", "number"),
        base_price: PaymentSubjectPrice => ("base_price", "basePrice", "PaymentSubjectPrice"),
        paid_price: PaymentSubjectPrice => ("paid_price", "paidPrice", "PaymentSubjectPrice"),
        variables: Vec<Value> => ("variables", "variables", "Array<any>"),
        expires_at: DateTime<Utc> => ("expires_at", "expiresAt", "Date | null"),
        custom: Value => ("custom", "custom", "any"),
        username: PaymentSubjectUsername => ("username", "username", "PaymentSubjectUsername"),
        servers: Vec<Value> => ("servers", "servers", "Array<any>"),
    }
}

model! {
    /// A share of a payment routed to another wallet
    pub struct RevenueShare as "RevenueShare" {
        wallet_ref: String => ("wallet_ref", "walletRef", "string"),
        amount: f64 => ("amount", "amount", "number"),
        gateway_fee_percent: f64 => ("gateway_fee_percent", "gatewayFeePercent", "number"),
    }
}

model! {
    /// Subject of `payment.*` and `payment.dispute.*` webhooks
    pub struct PaymentSubject as "PaymentSubject" {
        transaction_id: String => ("transaction_id", "transactionId", "string"),
        status: PaymentStatus => ("status", "status", "PaymentStatus"),
        payment_sequence: String => ("payment_sequence", "paymentSequence", "string"),
        created_at: DateTime<Utc> => ("created_at", "createdAt", "Date"),
        price: PaymentSubjectPrice => ("price", "price", "PaymentSubjectPrice"),
        price_paid: PaymentSubjectPrice => ("price_paid", "pricePaid", "PaymentSubjectPrice"),
        payment_method: PaymentSubjectPaymentMethod
            => ("payment_method", "paymentMethod", "PaymentSubjectPaymentMethod"),
        fees: PaymentSubjectFees => ("fees", "fees", "PaymentSubjectFees"),
        customer: PaymentSubjectCustomer => ("customer", "customer", "PaymentSubjectCustomer"),
        products: Vec<PaymentSubjectProductsInner>
            => ("products", "products", "Array<PaymentSubjectProductsInner>"),
        coupons: Vec<Value> => ("coupons", "coupons", "Array<any>"),
        gift_cards: Vec<Value> => ("gift_cards", "giftCards", "Array<any>"),
        recurring_payment_reference: String
            => ("recurring_payment_reference", "recurringPaymentReference", "string | null"),
        custom: Map<String, Value> => ("custom", "custom", "{ [key: string]: any; }"),
        revenue_share: Vec<RevenueShare> => ("revenue_share", "revenueShare", "Array<RevenueShare>"),
        decline_reason: Value => ("decline_reason", "declineReason", "any | null"),
        creator_code: String => ("creator_code", "creatorCode", "string | null"),
    }
}

model! {
    /// Status of a recurring payment
    pub struct RecurringPaymentSubjectStatus as "RecurringPaymentSubjectStatus" {
        id: i64 => ("id", "id", "number"),
        description: String => ("description", "description", "string"),
    }
}

model! {
    /// Subject of `recurring-payment.*` webhooks
    pub struct RecurringPaymentSubject as "RecurringPaymentSubject" {
        reference: String => ("reference", "reference", "string"),
        created_at: DateTime<Utc> => ("created_at", "createdAt", "Date"),
        next_payment_at: DateTime<Utc> => ("next_payment_at", "nextPaymentAt", "Date | null"),
        status: RecurringPaymentSubjectStatus
            => ("status", "status", "RecurringPaymentSubjectStatus"),
        initial_payment: PaymentSubject => ("initial_payment", "initialPayment", "PaymentSubject"),
        last_payment: PaymentSubject => ("last_payment", "lastPayment", "PaymentSubject"),
        fail_count: i64 => ("fail_count", "failCount", "number"),
        price: PaymentSubjectPrice => ("price", "price", "PaymentSubjectPrice"),
        cancelled_at: DateTime<Utc> => ("cancelled_at", "cancelledAt", "Date | null"),
        cancel_reason: String => ("cancel_reason", "cancelReason", "string | null"),
    }
}

model! {
    /// An ad-hoc package defined at checkout time
    pub struct Package as "Package" {
        name: String => ("name", "name", "string"),
        price: f64 => ("price", "price", "number"),
        package_type: PackageType => ("type", "type", "Package.TypeEnum"),
        expiry_period: PackageExpiryPeriod
            => ("expiry_period", "expiryPeriod", "Package.ExpiryPeriodEnum"),
        expiry_length: i64 => ("expiry_length", "expiryLength", "number"),
        qty: i64 => ("qty", "qty", "number"),
        custom: Map<String, Value> => ("custom", "custom", "{ [key: string]: any; }"),
    }
}

model! {
    pub struct BasketLinks as "BasketLinks" {
        payment: String => ("payment", "payment", "string"),
        checkout: String => ("checkout", "checkout", "string"),
    }
}

model! {
    pub struct PriceDetails as "PriceDetails" {
        full_price: f64 => ("fullPrice", "fullPrice", "number"),
        subtotal: f64 => ("subtotal", "subtotal", "number"),
        total: f64 => ("total", "total", "number"),
        surcharges: Vec<Value> => ("surcharges", "surcharges", "Array<any>"),
    }
}

model! {
    /// One package line in a basket
    pub struct BasketRow as "BasketRow" {
        id: i64 => ("id", "id", "number"),
        qty: i64 => ("qty", "qty", "number"),
        package: Package => ("package", "package", "Package"),
        revenue_share: Vec<RevenueShare> => ("revenue_share", "revenueShare", "Array<RevenueShare>"),
    }
}

model! {
    /// A checkout basket
    pub struct Basket as "Basket" {
        ident: String => ("ident", "ident", "string"),
        expire: DateTime<Utc> => ("expire", "expire", "Date"),
        price: f64 => ("price", "price", "number"),
        price_details: PriceDetails => ("priceDetails", "priceDetails", "PriceDetails"),
        return_url: String => ("return_url", "returnUrl", "string | null"),
        complete_url: String => ("complete_url", "completeUrl", "string | null"),
        first_name: String => ("first_name", "firstName", "string"),
        last_name: String => ("last_name", "lastName", "string"),
        email: String => ("email", "email", "string"),
        custom: Map<String, Value> => ("custom", "custom", "{ [key: string]: any; }"),
        rows: Vec<BasketRow> => ("rows", "rows", "Array<BasketRow>"),
        links: BasketLinks => ("links", "links", "BasketLinks"),
    }
}

model! {
    pub struct CreateBasketRequest as "CreateBasketRequest" {
        first_name: String => ("first_name", "firstName", "string"),
        last_name: String => ("last_name", "lastName", "string"),
        email: String => ("email", "email", "string"),
        return_url: String => ("return_url", "returnUrl", "string"),
        complete_url: String => ("complete_url", "completeUrl", "string"),
        custom: Map<String, Value> => ("custom", "custom", "{ [key: string]: any; }"),
        complete_auto_redirect: bool
            => ("complete_auto_redirect", "completeAutoRedirect", "boolean"),
        expires_at: DateTime<Utc> => ("expires_at", "expiresAt", "Date | undefined"),
    }
}

model! {
    pub struct AddPackageRequest as "AddPackageRequest" {
        package: Package => ("package", "package", "Package"),
        qty: i64 => ("qty", "qty", "number"),
        package_type: AddPackageType => ("type", "type", "AddPackageRequest.TypeEnum"),
        revenue_share: Vec<RevenueShare> => ("revenue_share", "revenueShare", "Array<RevenueShare>"),
    }
}

model! {
    /// A discount applied to a basket
    pub struct Sale as "Sale" {
        name: String => ("name", "name", "string"),
        discount_type: SaleDiscountType => ("discount_type", "discountType", "Sale.DiscountTypeEnum"),
        amount: f64 => ("amount", "amount", "number"),
    }
}

model! {
    pub struct UpdateRecurringPaymentRequest as "UpdateRecurringPaymentRequest" {
        status: RecurringPaymentUpdateStatus
            => ("status", "status", "UpdateRecurringPaymentRequest.StatusEnum"),
    }
}

/// Build the Checkout registry
pub fn registry() -> Registry {
    Registry::builder()
        .register::<PaymentSubjectPrice>()
        .register::<PaymentStatus>()
        .register::<PaymentSubjectPaymentMethod>()
        .register::<PaymentSubjectFees>()
        .register::<PaymentSubjectUsername>()
        .register::<PaymentSubjectCustomer>()
        .register::<PaymentSubjectProductsInner>()
        .register::<RevenueShare>()
        .register::<PaymentSubject>()
        .register::<RecurringPaymentSubjectStatus>()
        .register::<RecurringPaymentSubject>()
        .register::<Package>()
        .register::<BasketLinks>()
        .register::<PriceDetails>()
        .register::<BasketRow>()
        .register::<Basket>()
        .register::<CreateBasketRequest>()
        .register::<AddPackageRequest>()
        .register::<Sale>()
        .register::<UpdateRecurringPaymentRequest>()
        .register_enum::<PackageType>()
        .register_enum::<PackageExpiryPeriod>()
        .register_enum::<AddPackageType>()
        .register_enum::<SaleDiscountType>()
        .register_enum::<RecurringPaymentUpdateStatus>()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::models::checkout_registry;
    use crate::value::Model;
    use chrono::TimeZone;
    use serde_json::json;

    fn payment_wire() -> Value {
        json!({
            "transaction_id": "tbx-26929122a56954-1a8ea4",
            "status": {"id": 1, "description": "Complete"},
            "payment_sequence": "oneoff",
            "created_at": "2024-04-02T10:19:05.000Z",
            "price": {"amount": 1.5, "currency": "USD"},
            "price_paid": {"amount": 1.5, "currency": "USD"},
            "payment_method": {"name": "Test Payments", "refundable": true},
            "fees": {
                "tax": {"amount": 0, "currency": "USD"},
                "gateway": {"amount": 0.32, "currency": "USD"}
            },
            "customer": {
                "first_name": "Tebex",
                "last_name": "Integrations",
                "email": "integrations@tebex.io",
                "ip": "203.0.113.10",
                "username": {"id": "4b7d8a3c", "username": "tebex_dev"},
                "marketing_consent": false,
                "country": "GB",
                "postal_code": null
            },
            "products": [{
                "id": 6276316,
                "name": "VIP",
                "quantity": 1,
                "base_price": {"amount": 1.5, "currency": "USD"},
                "paid_price": {"amount": 1.5, "currency": "USD"},
                "variables": [],
                "expires_at": null,
                "custom": null,
                "username": {"id": "4b7d8a3c", "username": "tebex_dev"},
                "servers": []
            }],
            "coupons": [],
            "gift_cards": [],
            "recurring_payment_reference": null,
            "custom": {"order": "42"},
            "revenue_share": [],
            "decline_reason": null,
            "creator_code": null
        })
    }

    #[test]
    fn test_decode_payment_subject() {
        let subject: PaymentSubject = checkout_registry().codec().decode(&payment_wire()).unwrap();

        assert_eq!(
            subject.transaction_id.as_deref(),
            Some("tbx-26929122a56954-1a8ea4")
        );
        assert_eq!(subject.status.as_ref().and_then(|s| s.id), Some(1));
        assert_eq!(
            subject.created_at,
            Some(Utc.with_ymd_and_hms(2024, 4, 2, 10, 19, 5).unwrap())
        );
        assert_eq!(subject.price.as_ref().and_then(|p| p.amount), Some(1.5));
        let customer = subject.customer.as_ref().unwrap();
        assert_eq!(customer.first_name.as_deref(), Some("Tebex"));
        assert_eq!(customer.postal_code, None);
        assert_eq!(
            customer.username.as_ref().and_then(|u| u.username.as_deref()),
            Some("tebex_dev")
        );
        let products = subject.products.as_ref().unwrap();
        assert_eq!(products[0].name.as_deref(), Some("VIP"));
        assert_eq!(products[0].expires_at, None);
        assert_eq!(
            subject.custom.as_ref().and_then(|c| c.get("order")),
            Some(&json!("42"))
        );
    }

    #[test]
    fn test_payment_subject_round_trip() {
        let codec = checkout_registry().codec();
        let subject: PaymentSubject = codec.decode(&payment_wire()).unwrap();
        let wire = codec.encode(&subject).unwrap();
        let again: PaymentSubject = codec.decode(&wire).unwrap();
        assert_eq!(again, subject);
    }

    #[test]
    fn test_recurring_subject_nests_payments() {
        let wire = json!({
            "reference": "tbx-r-3244",
            "created_at": "2024-04-02T10:19:05.000Z",
            "next_payment_at": "2024-05-02T10:19:05.000Z",
            "status": {"id": 2, "description": "Active"},
            "initial_payment": payment_wire(),
            "last_payment": payment_wire(),
            "fail_count": 0,
            "price": {"amount": 1.5, "currency": "USD"},
            "cancelled_at": null,
            "cancel_reason": null
        });

        let subject: RecurringPaymentSubject = checkout_registry().codec().decode(&wire).unwrap();
        assert_eq!(subject.reference.as_deref(), Some("tbx-r-3244"));
        assert_eq!(subject.status.as_ref().and_then(|s| s.id), Some(2));
        assert_eq!(
            subject
                .initial_payment
                .as_ref()
                .and_then(|p| p.transaction_id.as_deref()),
            Some("tbx-26929122a56954-1a8ea4")
        );
        assert_eq!(subject.cancelled_at, None);
    }

    #[test]
    fn test_encode_request_uses_wire_names() {
        let request = AddPackageRequest {
            package: Some(Package {
                name: Some("100 Gems".to_string()),
                price: Some(4.99),
                package_type: Some(PackageType::Single),
                qty: Some(1),
                ..Default::default()
            }),
            qty: Some(2),
            package_type: Some(AddPackageType::Single),
            ..Default::default()
        };

        let wire = checkout_registry().codec().encode(&request).unwrap();
        assert_eq!(
            wire,
            json!({
                "package": {"name": "100 Gems", "price": 4.99, "type": "single", "qty": 1},
                "qty": 2,
                "type": "single"
            })
        );
    }

    #[test]
    fn test_encode_renders_dates_with_millis() {
        let request = CreateBasketRequest {
            email: Some("customer@example.com".to_string()),
            expires_at: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let wire = checkout_registry().codec().encode(&request).unwrap();
        assert_eq!(wire["expires_at"], json!("2030-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_enum_literals_are_registered() {
        let registry = checkout_registry();
        assert_eq!(
            registry.enum_values("Package.ExpiryPeriodEnum").unwrap(),
            ["day", "week", "month", "year"]
        );
        assert!(registry.is_legal_enum_value("UpdateRecurringPaymentRequest.StatusEnum", "Paused"));
        assert_eq!(PackageType::Subscription.as_str(), "subscription");
    }

    #[test]
    fn test_enum_values_are_not_validated_by_codec() {
        let wire = json!({"name": "x", "type": "bundle"});
        let model = checkout_registry()
            .codec()
            .deserialize(Some(&wire), &Descriptor::named("Package"))
            .unwrap();
        assert_eq!(model.get("type"), Some(&Model::from("bundle")));
    }
}

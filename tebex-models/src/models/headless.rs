//! Headless API models

use crate::registry::Registry;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

model_enum! {
    pub enum CategoryDisplayType as "Category.DisplayTypeEnum" {
        List = "list",
        Grid = "grid",
    }
}

model_enum! {
    pub enum BasketPackageType as "BasketPackage.TypeEnum" {
        Single = "single",
        Subscription = "subscription",
    }
}

model! {
    /// Public information about a webstore
    pub struct Webstore as "Webstore" {
        id: i64 => ("id", "id", "number"),
        description: String => ("description", "description", "string"),
        name: String => ("name", "name", "string"),
        webstore_url: String => ("webstore_url", "webstoreUrl", "string"),
        currency: String => ("currency", "currency", "string"),
        lang: String => ("lang", "lang", "string"),
        logo: String => ("logo", "logo", "string | null"),
        platform_type: String => ("platform_type", "platformType", "string"),
        created_at: DateTime<Utc> => ("created_at", "createdAt", "Date"),
    }
}

model! {
    /// A store package as listed by the Headless API
    pub struct Package as "Package" {
        id: i64 => ("id", "id", "number"),
        name: String => ("name", "name", "string"),
        description: String => ("description", "description", "string"),
        image: String => ("image", "image", "string | null"),
        package_type: String => ("type", "type", "string"),
        category: Value => ("category", "category", "any"),
        base_price: f64 => ("base_price", "basePrice", "number"),
        sales_tax: f64 => ("sales_tax", "salesTax", "number"),
        total_price: f64 => ("total_price", "totalPrice", "number"),
        currency: String => ("currency", "currency", "string"),
        discount: f64 => ("discount", "discount", "number"),
        disable_quantity: bool => ("disable_quantity", "disableQuantity", "boolean"),
        disable_gifting: bool => ("disable_gifting", "disableGifting", "boolean"),
        expiration_date: DateTime<Utc> => ("expiration_date", "expirationDate", "Date | null"),
        created_at: DateTime<Utc> => ("created_at", "createdAt", "Date"),
        updated_at: DateTime<Utc> => ("updated_at", "updatedAt", "Date"),
    }
}

model! {
    /// A category and the packages it lists
    pub struct Category as "Category" {
        id: i64 => ("id", "id", "number"),
        name: String => ("name", "name", "string"),
        slug: String => ("slug", "slug", "string | null"),
        parent: Value => ("parent", "parent", "any"),
        description: String => ("description", "description", "string"),
        packages: Vec<Package> => ("packages", "packages", "Array<Package>"),
        order: i64 => ("order", "order", "number"),
        display_type: CategoryDisplayType
            => ("display_type", "displayType", "Category.DisplayTypeEnum"),
    }
}

model! {
    /// A package line inside a Headless basket
    pub struct BasketPackage as "BasketPackage" {
        id: i64 => ("id", "id", "number"),
        name: String => ("name", "name", "string"),
        description: String => ("description", "description", "string"),
        package_type: BasketPackageType => ("type", "type", "BasketPackage.TypeEnum"),
        in_basket: Map<String, Value> => ("in_basket", "inBasket", "{ [key: string]: any; }"),
    }
}

model! {
    pub struct BasketLinks as "BasketLinks" {
        checkout: String => ("checkout", "checkout", "string"),
    }
}

model! {
    pub struct Coupon as "Coupon" {
        coupon_code: String => ("coupon_code", "couponCode", "string"),
    }
}

model! {
    pub struct GiftCard as "GiftCard" {
        card_number: String => ("card_number", "cardNumber", "string"),
        balance: Value => ("balance", "balance", "any"),
    }
}

model! {
    /// A Headless basket
    pub struct Basket as "Basket" {
        ident: String => ("ident", "ident", "string"),
        complete: bool => ("complete", "complete", "boolean"),
        id: i64 => ("id", "id", "number"),
        country: String => ("country", "country", "string"),
        ip: String => ("ip", "ip", "string"),
        username_id: String => ("username_id", "usernameId", "string | null"),
        username: String => ("username", "username", "string | null"),
        cancel_url: String => ("cancel_url", "cancelUrl", "string"),
        complete_url: String => ("complete_url", "completeUrl", "string | null"),
        complete_auto_redirect: bool
            => ("complete_auto_redirect", "completeAutoRedirect", "boolean"),
        base_price: f64 => ("base_price", "basePrice", "number"),
        sales_tax: f64 => ("sales_tax", "salesTax", "number"),
        total_price: f64 => ("total_price", "totalPrice", "number"),
        currency: String => ("currency", "currency", "string"),
        packages: Vec<BasketPackage> => ("packages", "packages", "Array<BasketPackage>"),
        coupons: Vec<Coupon> => ("coupons", "coupons", "Array<Coupon>"),
        giftcards: Vec<GiftCard> => ("giftcards", "giftcards", "Array<GiftCard>"),
        creator_code: String => ("creator_code", "creatorCode", "string"),
        links: BasketLinks => ("links", "links", "BasketLinks"),
        custom: Map<String, Value> => ("custom", "custom", "{ [key: string]: any; }"),
    }
}

model! {
    /// A custom page published on the webstore
    pub struct CmsPage as "CMSPage" {
        id: i64 => ("id", "id", "number"),
        created_at: DateTime<Utc> => ("created_at", "createdAt", "Date"),
        updated_at: DateTime<Utc> => ("updated_at", "updatedAt", "Date"),
        account_id: i64 => ("account_id", "accountId", "number"),
        title: String => ("title", "title", "string"),
        slug: String => ("slug", "slug", "string"),
        private: bool => ("private", "_private", "boolean"),
        hidden: bool => ("hidden", "hidden", "boolean"),
        disabled: bool => ("disabled", "disabled", "boolean"),
        sequence: bool => ("sequence", "sequence", "boolean"),
        content: String => ("content", "content", "string"),
    }
}

/// Build the Headless registry
pub fn registry() -> Registry {
    Registry::builder()
        .register::<Webstore>()
        .register::<Package>()
        .register::<Category>()
        .register::<BasketPackage>()
        .register::<BasketLinks>()
        .register::<Coupon>()
        .register::<GiftCard>()
        .register::<Basket>()
        .register::<CmsPage>()
        .register_enum::<CategoryDisplayType>()
        .register_enum::<BasketPackageType>()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::headless_registry;
    use serde_json::json;

    #[test]
    fn test_decode_category_with_packages() {
        let wire = json!({
            "id": 12,
            "name": "Ranks",
            "slug": null,
            "parent": null,
            "description": "",
            "packages": [{
                "id": 6276316,
                "name": "VIP",
                "type": "single",
                "base_price": 10,
                "sales_tax": 0,
                "total_price": 10,
                "currency": "EUR",
                "expiration_date": null,
                "created_at": "2023-11-20T09:00:00.000Z"
            }],
            "order": 0,
            "display_type": "grid"
        });

        let category: Category = headless_registry().codec().decode(&wire).unwrap();
        assert_eq!(category.display_type, Some(CategoryDisplayType::Grid));
        let packages = category.packages.unwrap();
        assert_eq!(packages[0].name.as_deref(), Some("VIP"));
        assert_eq!(packages[0].total_price, Some(10.0));
        assert!(packages[0].created_at.is_some());
        assert_eq!(packages[0].expiration_date, None);
    }

    #[test]
    fn test_decode_basket_nested_arrays() {
        let wire = json!({
            "ident": "a5ba-4fb2",
            "complete": false,
            "packages": [{"id": 1, "name": "VIP", "type": "subscription", "in_basket": {"quantity": 1}}],
            "coupons": [{"coupon_code": "SPRING"}],
            "giftcards": [{"card_number": "9000-1111", "balance": {"amount": 5}}],
            "links": {"checkout": "https://pay.tebex.io/a5ba-4fb2"}
        });

        let basket: Basket = headless_registry().codec().decode(&wire).unwrap();
        assert_eq!(basket.ident.as_deref(), Some("a5ba-4fb2"));
        assert_eq!(
            basket.packages.as_ref().unwrap()[0].package_type,
            Some(BasketPackageType::Subscription)
        );
        assert_eq!(
            basket.coupons.as_ref().unwrap()[0].coupon_code.as_deref(),
            Some("SPRING")
        );
        assert_eq!(
            basket.giftcards.as_ref().unwrap()[0].card_number.as_deref(),
            Some("9000-1111")
        );
        assert_eq!(
            basket.links.and_then(|l| l.checkout).as_deref(),
            Some("https://pay.tebex.io/a5ba-4fb2")
        );
    }

    #[test]
    fn test_cms_page_private_member_renamed() {
        let wire = json!({"id": 3, "title": "Rules", "private": true});
        let codec = headless_registry().codec();
        let page: CmsPage = codec.decode(&wire).unwrap();
        assert_eq!(page.private, Some(true));
        assert_eq!(codec.encode(&page).unwrap(), wire);
    }
}

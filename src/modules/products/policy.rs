use catalog_authz::{Action, Identity, Role};
use catalog_db::Product;

/// Who may do what to a catalog product.
///
/// Anyone may view; admins and managers may delete; only admins may create
/// or update.
pub fn product_policy(identity: &Identity, action: Action, _product: &Product) -> bool {
    match action {
        Action::View => true,
        Action::Delete => identity.has_any_role(&[Role::Admin, Role::Manager]),
        Action::Create | Action::Update => identity.has_role(Role::Admin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_authz::can;
    use catalog_db::{fixtures, ProductId};

    fn product() -> Product {
        fixtures::demo_product(1).into_product(ProductId(1))
    }

    #[test]
    fn delete_requires_admin_or_manager() {
        let product = product();
        let admin = Identity::new("ana", [Role::Admin]);
        let manager = Identity::new("max", [Role::Manager]);
        let customer = Identity::new("cleo", [Role::Customer]);
        let nobody = Identity::new("anon", []);

        assert!(can(&product_policy, &admin, Action::Delete, &product));
        assert!(can(&product_policy, &manager, Action::Delete, &product));
        assert!(!can(&product_policy, &customer, Action::Delete, &product));
        assert!(!can(&product_policy, &nobody, Action::Delete, &product));
    }

    #[test]
    fn viewing_is_open_and_writes_are_admin_only() {
        let product = product();
        let manager = Identity::new("max", [Role::Manager]);
        let customer = Identity::new("cleo", [Role::Customer]);

        assert!(product_policy(&customer, Action::View, &product));
        assert!(!product_policy(&manager, Action::Update, &product));
        assert!(product_policy(&Identity::new("ana", [Role::Admin]), Action::Create, &product));
    }
}

//! User accounts.

use libra_schema::user::{StoreUser, UpdateUser, User};

use crate::{ContractRouter, ResourceContractSpec, create_resource_contract};

pub fn contract() -> ContractRouter {
    let spec = ResourceContractSpec::<User, StoreUser, UpdateUser>::new(
        "/api/v1/users",
        "User",
        "Users",
    );
    create_resource_contract(&spec)
}

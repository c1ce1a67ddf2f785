/// Named capabilities gating privileged messages.
///
/// Membership lives in contract storage as a `(Role, AccountId)` set; this
/// module only fixes the role names and who administers each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Role {
    /// Configuration, reserve, oracle and role administration.
    Admin,
    /// `mint` and `reward_chatroom_idea`.
    Minter,
    /// `lock`.
    Locker,
    /// `post_price`.
    PriceFeeder,
}

impl Role {
    /// Role whose members may grant and revoke `self`.
    ///
    /// A single hierarchy: `Admin` administers every role, itself included.
    pub const fn admin_role(self) -> Role {
        match self {
            Role::Admin | Role::Minter | Role::Locker | Role::PriceFeeder => Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_self_administered() {
        assert_eq!(Role::Admin.admin_role(), Role::Admin);
    }

    #[test]
    fn operational_roles_are_admin_administered() {
        for role in [Role::Minter, Role::Locker, Role::PriceFeeder] {
            assert_eq!(role.admin_role(), Role::Admin);
        }
    }
}

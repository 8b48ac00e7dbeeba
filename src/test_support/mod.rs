pub(crate) mod socket_guard;

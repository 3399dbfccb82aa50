mod naming;
mod support;
mod type_mapper;

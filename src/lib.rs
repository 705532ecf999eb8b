pub mod ctrl;
pub mod net;
pub mod sim;
pub mod topo;
pub mod viz;

#[cfg(test)]
mod test;

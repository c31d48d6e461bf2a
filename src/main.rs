use diskscan::app;

fn main() {
    app::startup::startup();
}

fn main() {
    staffdesk::start();
}

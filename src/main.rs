fn main() {
    maillon::show::run(std::env::args().skip(1));
}

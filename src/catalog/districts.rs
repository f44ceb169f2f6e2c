//! Administrative reference data: 64 districts in 8 divisions with their upazillas.

use super::{District, Division};

pub static DISTRICTS: &[District] = &[
    District {
        id: 1,
        name: "Cumilla",
        division: Division::Chattogram,
        upazillas: &["Debidwar", "Barura", "Brahmanpara", "Chandina", "Chauddagram", "Daudkandi",
            "Homna", "Laksam", "Muradnagar", "Nangalkot", "Cumillasadar", "Meghna",
            "Monohargonj", "Sadarsouth", "Titas", "Burichang", "Lalmai"],
    },
    District {
        id: 2,
        name: "Feni",
        division: Division::Chattogram,
        upazillas: &["Chhagalnaiya", "Sadar", "Sonagazi", "Fulgazi", "Parshuram", "Daganbhuiyan"],
    },
    District {
        id: 3,
        name: "Brahmanbaria",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Kasba", "Nasirnagar", "Sarail", "Ashuganj", "Akhaura",
            "Nabinagar", "Bancharampur", "Bijoynagar"],
    },
    District {
        id: 4,
        name: "Rangamati",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Kaptai", "Kawkhali", "Baghaichari", "Barkal", "Langadu",
            "Rajasthali", "Belaichari", "Juraichari", "Naniarchar"],
    },
    District {
        id: 5,
        name: "Noakhali",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Companiganj", "Begumganj", "Hatia", "Subarnachar", "Kabirhat",
            "Senbug", "Chatkhil", "Sonaimuri"],
    },
    District {
        id: 6,
        name: "Chandpur",
        division: Division::Chattogram,
        upazillas: &["Haimchar", "Kachua", "Shahrasti", "Sadar", "Matlabsouth", "Hajiganj",
            "Matlabnorth", "Faridgonj"],
    },
    District {
        id: 7,
        name: "Lakshmipur",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Kamalnagar", "Raipur", "Ramgati", "Ramganj"],
    },
    District {
        id: 8,
        name: "Chattogram",
        division: Division::Chattogram,
        upazillas: &["Rangunia", "Sitakunda", "Mirsharai", "Patiya", "Sandwip", "Banshkhali",
            "Boalkhali", "Anwara", "Chandanaish", "Satkania", "Lohagara", "Hathazari",
            "Fatikchhari", "Raozan", "Karnafuli"],
    },
    District {
        id: 9,
        name: "Coxsbazar",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Chakaria", "Kutubdia", "Ukhiya", "Moheshkhali", "Pekua", "Ramu",
            "Teknaf"],
    },
    District {
        id: 10,
        name: "Khagrachhari",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Dighinala", "Panchari", "Laxmichhari", "Mohalchari", "Manikchari",
            "Ramgarh", "Matiranga", "Guimara"],
    },
    District {
        id: 11,
        name: "Bandarban",
        division: Division::Chattogram,
        upazillas: &["Sadar", "Alikadam", "Naikhongchhari", "Rowangchhari", "Lama", "Ruma",
            "Thanchi"],
    },
    District {
        id: 12,
        name: "Sirajganj",
        division: Division::Rajshahi,
        upazillas: &["Belkuchi", "Chauhali", "Kamarkhand", "Kazipur", "Raigonj", "Shahjadpur",
            "Sirajganjsadar", "Tarash", "Ullapara"],
    },
    District {
        id: 13,
        name: "Pabna",
        division: Division::Rajshahi,
        upazillas: &["Sujanagar", "Ishurdi", "Bhangura", "Pabnasadar", "Bera", "Atghoria",
            "Chatmohar", "Santhia", "Faridpur"],
    },
    District {
        id: 14,
        name: "Bogura",
        division: Division::Rajshahi,
        upazillas: &["Kahaloo", "Sadar", "Shariakandi", "Shajahanpur", "Dupchanchia",
            "Adamdighi", "Nondigram", "Sonatala", "Dhunot", "Gabtali", "Sherpur", "Shibganj"],
    },
    District {
        id: 15,
        name: "Rajshahi",
        division: Division::Rajshahi,
        upazillas: &["Paba", "Durgapur", "Mohonpur", "Charghat", "Puthia", "Bagha", "Godagari",
            "Tanore", "Bagmara"],
    },
    District {
        id: 16,
        name: "Natore",
        division: Division::Rajshahi,
        upazillas: &["Natoresadar", "Singra", "Baraigram", "Bagatipara", "Lalpur", "Gurudaspur",
            "Naldanga"],
    },
    District {
        id: 17,
        name: "Joypurhat",
        division: Division::Rajshahi,
        upazillas: &["Akkelpur", "Kalai", "Khetlal", "Panchbibi", "Joypurhatsadar"],
    },
    District {
        id: 18,
        name: "Chapainawabganj",
        division: Division::Rajshahi,
        upazillas: &["Chapainawabganjsadar", "Gomostapur", "Nachol", "Bholahat", "Shibganj"],
    },
    District {
        id: 19,
        name: "Naogaon",
        division: Division::Rajshahi,
        upazillas: &["Mohadevpur", "Badalgachi", "Patnitala", "Dhamoirhat", "Niamatpur", "Manda",
            "Atrai", "Raninagar", "Naogaonsadar", "Porsha", "Sapahar"],
    },
    District {
        id: 20,
        name: "Khulna",
        division: Division::Khulna,
        upazillas: &["Paikgachha", "Dacope", "Batiaghata", "Dumuria", "Dighalia", "Koyra",
            "Terokhada", "Rupsa", "Phultala"],
    },
    District {
        id: 21,
        name: "Bagerhat",
        division: Division::Khulna,
        upazillas: &["Fakirhat", "Bagerhat Sadar", "Mollahat", "Sarankhola", "Rampal",
            "Morrelganj", "Kachua", "Mongla", "Chitalmari"],
    },
    District {
        id: 22,
        name: "Satkhira",
        division: Division::Khulna,
        upazillas: &["Satkhira Sadar", "Assasuni", "Debhata", "Tala", "Kalaroa", "Kaliganj",
            "Shyamnagar"],
    },
    District {
        id: 23,
        name: "Jashore",
        division: Division::Khulna,
        upazillas: &["Manirampur", "Abhaynagar", "Bagherpara", "Chougachha", "Jhikargacha",
            "Keshabpur", "Jashore Sadar", "Sharsha"],
    },
    District {
        id: 24,
        name: "Jhenaidah",
        division: Division::Khulna,
        upazillas: &["Jhenaidah Sadar", "Maheshpur", "Kaliganj", "Kotchandpur", "Shailkupa",
            "Harinakunda"],
    },
    District {
        id: 25,
        name: "Magura",
        division: Division::Khulna,
        upazillas: &["Magura Sadar", "Mohammadpur", "Shalikha", "Sreepur"],
    },
    District {
        id: 26,
        name: "Narail",
        division: Division::Khulna,
        upazillas: &["Narail Sadar", "Lohagara", "Kalia"],
    },
    District {
        id: 27,
        name: "Chuadanga",
        division: Division::Khulna,
        upazillas: &["Chuadanga Sadar", "Alamdanga", "Damurhuda", "Jibannagar"],
    },
    District {
        id: 28,
        name: "Kushtia",
        division: Division::Khulna,
        upazillas: &["Kushtia Sadar", "Kumarkhali", "Khoksa", "Mirpur", "Daulatpur", "Bheramara"],
    },
    District {
        id: 29,
        name: "Meherpur",
        division: Division::Khulna,
        upazillas: &["Meherpur Sadar", "Mujibnagar", "Gangni"],
    },
    District {
        id: 30,
        name: "Barishal",
        division: Division::Barishal,
        upazillas: &["Barishal Sadar", "Bakerganj", "Babuganj", "Wazirpur", "Banaripara",
            "Gournadi", "Agailjhara", "Mehendiganj", "Muladi", "Hizla"],
    },
    District {
        id: 31,
        name: "Barguna",
        division: Division::Barishal,
        upazillas: &["Barguna Sadar", "Amtali", "Betagi", "Bamna", "Pathorghata", "Taltali"],
    },
    District {
        id: 32,
        name: "Bhola",
        division: Division::Barishal,
        upazillas: &["Bhola Sadar", "Borhanuddin", "Charfesson", "Doulatkhan", "Lalmohan",
            "Manpura", "Tazumuddin"],
    },
    District {
        id: 33,
        name: "Jhalokati",
        division: Division::Barishal,
        upazillas: &["Jhalokati Sadar", "Kathalia", "Nalchity", "Rajapur"],
    },
    District {
        id: 34,
        name: "Patuakhali",
        division: Division::Barishal,
        upazillas: &["Patuakhali Sadar", "Bauphal", "Dashmina", "Dumki", "Kalapara", "Mirzaganj",
            "Galachipa", "Rangabali"],
    },
    District {
        id: 35,
        name: "Pirojpur",
        division: Division::Barishal,
        upazillas: &["Pirojpur Sadar", "Nazirpur", "Kawkhali", "Zianagar", "Bhandaria",
            "Mathbaria", "Nesarabad"],
    },
    District {
        id: 36,
        name: "Sylhet",
        division: Division::Sylhet,
        upazillas: &["Balaganj", "Beanibazar", "Bishwanath", "Companiganj", "Fenchuganj",
            "Golapganj", "Gowainghat", "Jaintiapur", "Kanaighat", "Sylhetsadar", "Zakiganj",
            "Dakshinsurma", "Osmaninagar"],
    },
    District {
        id: 37,
        name: "Moulvibazar",
        division: Division::Sylhet,
        upazillas: &["Moulvibazar Sadar", "Kamalganj", "Kulaura", "Rajnagar", "Sreemangal",
            "Barlekha", "Juri"],
    },
    District {
        id: 38,
        name: "Habiganj",
        division: Division::Sylhet,
        upazillas: &["Nabiganj", "Bahubal", "Ajmiriganj", "Baniachong", "Lakhai", "Chunarughat",
            "Habiganj Sadar", "Madhabpur", "Shayestaganj"],
    },
    District {
        id: 39,
        name: "Sunamganj",
        division: Division::Sylhet,
        upazillas: &["Sunamganj Sadar", "South Sunamganj", "Bishwambarpur", "Chhatak",
            "Jagannathpur", "Dowarabazar", "Tahirpur", "Dharmapasha", "Jamalganj", "Shalla",
            "Derai"],
    },
    District {
        id: 40,
        name: "Dhaka",
        division: Division::Dhaka,
        upazillas: &["Savar", "Dhamrai", "Keraniganj", "Nawabganj", "Dohar"],
    },
    District {
        id: 41,
        name: "Gazipur",
        division: Division::Dhaka,
        upazillas: &["Gazipur Sadar", "Kaliakair", "Kapasia", "Sreepur", "Kaliganj"],
    },
    District {
        id: 42,
        name: "Narsingdi",
        division: Division::Dhaka,
        upazillas: &["Belabo", "Monohardi", "Narsingdi Sadar", "Palash", "Raipura", "Shibpur"],
    },
    District {
        id: 43,
        name: "Manikganj",
        division: Division::Dhaka,
        upazillas: &["Manikganj Sadar", "Singair", "Saturiaa", "Harirampur", "Ghior",
            "Shibalaya", "Daulatpur"],
    },
    District {
        id: 44,
        name: "Munshiganj",
        division: Division::Dhaka,
        upazillas: &["Munshiganj Sadar", "Sreenagar", "Sirajdikhan", "Louhajanj", "Gajaria",
            "Tongibari"],
    },
    District {
        id: 45,
        name: "Narayanganj",
        division: Division::Dhaka,
        upazillas: &["Araihazar", "Bandar", "Narayanganj Sadar", "Rupganj", "Sonargaon"],
    },
    District {
        id: 46,
        name: "Tangail",
        division: Division::Dhaka,
        upazillas: &["Basail", "Bhuapur", "Delduar", "Ghatail", "Gopalpur", "Madhupur",
            "Mirzapur", "Nagarpur", "Sakhipur", "Tangail Sadar", "Kalihati", "Dhanbari"],
    },
    District {
        id: 47,
        name: "Kishoreganj",
        division: Division::Dhaka,
        upazillas: &["Itna", "Katiadi", "Bhairab", "Tarail", "Hossainpur", "Pakundia",
            "Kuliarchar", "Kishoreganj Sadar", "Karimganj", "Bajitpur", "Austagram", "Mithamain",
            "Nikli"],
    },
    District {
        id: 48,
        name: "Madaripur",
        division: Division::Dhaka,
        upazillas: &["Madaripur Sadar", "Shibchar", "Kalkini", "Rajoir", "Dasar"],
    },
    District {
        id: 49,
        name: "Rajbari",
        division: Division::Dhaka,
        upazillas: &["Rajbari Sadar", "Goalanda", "Pangsha", "Baliakandi", "Kalukhali"],
    },
    District {
        id: 50,
        name: "Gopalganj",
        division: Division::Dhaka,
        upazillas: &["Gopalganj Sadar", "Kashiani", "Tungipara", "Kotalipara", "Muksudpur"],
    },
    District {
        id: 51,
        name: "Faridpur",
        division: Division::Dhaka,
        upazillas: &["Faridpur Sadar", "Alfadanga", "Boalmari", "Sadarpur", "Nagarkanda",
            "Bhanga", "Charbhadrasan", "Madhukhali", "Saltha"],
    },
    District {
        id: 52,
        name: "Shariatpur",
        division: Division::Dhaka,
        upazillas: &["Shariatpur Sadar", "Naria", "Zajira", "Gosairhat", "Bhedarganj", "Damudya"],
    },
    District {
        id: 53,
        name: "Rangpur",
        division: Division::Rangpur,
        upazillas: &["Rangpur Sadar", "Gangachara", "Taragonj", "Badargonj", "Mithapukur",
            "Pirgonj", "Kaunia", "Pirgacha"],
    },
    District {
        id: 54,
        name: "Panchagarh",
        division: Division::Rangpur,
        upazillas: &["Panchagarh Sadar", "Debiganj", "Boda", "Atwari", "Tetulia"],
    },
    District {
        id: 55,
        name: "Dinajpur",
        division: Division::Rangpur,
        upazillas: &["Nawabganj", "Birganj", "Ghoraghat", "Birampur", "Parbatipur", "Bochaganj",
            "Kaharol", "Fulbari", "Dinajpur Sadar", "Hakimpur", "Khansama", "Birol",
            "Chirirbandar"],
    },
    District {
        id: 56,
        name: "Lalmonirhat",
        division: Division::Rangpur,
        upazillas: &["Lalmonirhat Sadar", "Kaliganj", "Hatibandha", "Patgram", "Aditmari"],
    },
    District {
        id: 57,
        name: "Nilphamari",
        division: Division::Rangpur,
        upazillas: &["Nilphamari Sadar", "Saidpur", "Jaldhaka", "Kishoreganj", "Domar", "Dimla"],
    },
    District {
        id: 58,
        name: "Gaibandha",
        division: Division::Rangpur,
        upazillas: &["Gaibandha Sadar", "Sadullapur", "Palashbari", "Saghata", "Gobindaganj",
            "Sundarganj", "Phulchari"],
    },
    District {
        id: 59,
        name: "Thakurgaon",
        division: Division::Rangpur,
        upazillas: &["Thakurgaon Sadar", "Pirganj", "Ranisankail", "Haripur", "Baliadangi"],
    },
    District {
        id: 60,
        name: "Kurigram",
        division: Division::Rangpur,
        upazillas: &["Kurigram Sadar", "Nageshwari", "Bhurungamari", "Phulbari", "Rajarhat",
            "Ulipur", "Chilmari", "Rowmari", "Char Rajibpur"],
    },
    District {
        id: 61,
        name: "Mymensingh",
        division: Division::Mymensingh,
        upazillas: &["Mymensingh Sadar", "Muktagachha", "Gauripur", "Phulpur", "Haluaghat",
            "Trishal", "Ishwarganj", "Nandail", "Gafargaon", "Tara Khanda", "Bhaluka",
            "Dhobaura", "Fulbaria"],
    },
    District {
        id: 62,
        name: "Jamalpur",
        division: Division::Mymensingh,
        upazillas: &["Jamalpur Sadar", "Melandaha", "Islampur", "Dewanganj", "Sarishabari",
            "Madarganj", "Bokshiganj"],
    },
    District {
        id: 63,
        name: "Netrokona",
        division: Division::Mymensingh,
        upazillas: &["Netrokona Sadar", "Kendua", "Atpara", "Madan", "Khaliajuri", "Kalmakanda",
            "Mohongonj", "Purbadhala", "Durgapur", "Barhatta"],
    },
    District {
        id: 64,
        name: "Sherpur",
        division: Division::Mymensingh,
        upazillas: &["Sherpur Sadar", "Nalitabari", "Sreebordi", "Nokla", "Jhenaigati"],
    },
];
